//! Splits a model response into numbered sections.

use once_cell::sync::Lazy;
use regex::Regex;

/// A line that opens a numbered item: `1.` through `9.`, optionally bolded.
static ITEM_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\*\*)?[1-9]\.").unwrap());

/// Splits `text` before every line that starts with a numbered-item marker.
///
/// Each section keeps its marker line and everything up to the next marker
/// line. Text before the first marker forms its own leading section, so a
/// response without markers comes back as a single section holding the whole
/// input.
pub fn split(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 && ITEM_MARKER_RE.is_match(line) {
            sections.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }
    sections.push(current.join("\n"));
    sections
}
