//! Markup stripping shared by the extractors.
//!
//! Models wrap captions and song titles in straight or smart double quotes and
//! markdown bold. Only those decorations are removed; single quotes and
//! apostrophes are part of the text.

const QUOTE_MARKS: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

/// Removes straight and smart double quotes.
pub fn strip_quotes(text: &str) -> String {
    text.chars().filter(|c| !QUOTE_MARKS.contains(c)).collect()
}

/// Removes double quotes and `**` bold markers, then trims.
pub fn strip_emphasis(text: &str) -> String {
    strip_quotes(text).replace("**", "").trim().to_string()
}

/// Removes every `*` and double quote. Used for single-token values such as
/// filter names where stray asterisks are never meaningful.
pub fn strip_all_stars(text: &str) -> String {
    strip_quotes(text).replace('*', "").trim().to_string()
}

/// Length in characters, not bytes; captions are full of emoji.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
