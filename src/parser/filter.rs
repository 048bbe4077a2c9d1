//! Filter recommendation recovery.
//!
//! The whole response is searched, not the numbered sections: models put the
//! filter block after the last caption, so it usually lands inside section 3.

use once_cell::sync::Lazy;
use regex::Regex;

use super::markup::strip_all_stars;

/// Anchors tried in priority order. The first one found anywhere in the text
/// decides the result.
static FILTER_ANCHORS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)filter(?:\*\*)?[ \t]*:").unwrap(),
        Regex::new(r"(?i)recommended filter(?:\*\*)?[ \t]*:").unwrap(),
        Regex::new(r"(?i)instagram filter(?:\*\*)?[ \t]*:").unwrap(),
    ]
});

/// Where a filter block ends: a blank line or the next reason/songs/music label.
static BLOCK_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\n[ \t\r]*\n|\nreason|\nsongs|\nmusic").unwrap());

/// Filter name plus whatever explanation followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFilter {
    pub name: String,
    pub explanation: String,
}

/// Finds the filter block in `text`.
///
/// The first line of the captured block is the name, the remaining lines are
/// joined into the explanation. Returns `None` when no anchor is present or
/// the winning anchor captured no name; later anchors are not consulted once
/// one has matched.
pub fn extract(text: &str) -> Option<RawFilter> {
    let anchor = FILTER_ANCHORS.iter().find_map(|re| re.find(text))?;

    let start = anchor.end();
    let end = BLOCK_END_RE.find_at(text, start).map_or(text.len(), |m| m.start());
    let block = text[start..end].trim();

    let mut lines = block.lines();
    let name = strip_all_stars(lines.next().unwrap_or_default());
    if name.is_empty() {
        return None;
    }

    let explanation = lines
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Some(RawFilter { name, explanation })
}
