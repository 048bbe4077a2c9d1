//! Denylist scan over caption text.

/// Terms flagged when no denylist is configured.
pub const DEFAULT_DENYLIST: [&str; 5] = ["crazy", "lame", "exotic", "tribal", "gyp"];

/// Returns every denylist entry found in `text`, case-insensitively, in
/// denylist order. Matching is by substring, so "gyp" also hits "gypsy".
pub fn scan<S: AsRef<str>>(text: &str, denylist: &[S]) -> Vec<String> {
    let haystack = text.to_lowercase();
    denylist
        .iter()
        .map(AsRef::as_ref)
        .filter(|term| !term.is_empty() && haystack.contains(&term.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// A configured denylist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiasScanner {
    terms: Vec<String>,
}

impl BiasScanner {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { terms: terms.into_iter().map(Into::into).collect() }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn scan(&self, text: &str) -> Vec<String> {
        scan(text, &self.terms)
    }
}

impl Default for BiasScanner {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST)
    }
}
