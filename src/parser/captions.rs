//! Caption recovery: numbered caption blocks, and the hashtag fallback used
//! when no block could be read.

use once_cell::sync::Lazy;
use regex::Regex;

use super::markup::{char_len, strip_emphasis, strip_quotes};

/// Reason attached to captions recovered by [`synthesize_fallback`].
pub const FALLBACK_REASON: &str = "Caption extracted from AI response";

/// Most captions the fallback will produce.
pub const FALLBACK_LIMIT: usize = 3;

static CAPTION_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\*\*)?[1-3]\.").unwrap());

static CAPTION_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\*\*)?[1-3]\.\s*(?:\*\*)?\s*").unwrap());

static REASON_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:\*\*)?reason\s*:(?:\*\*)?\s*").unwrap());

/// Labels that end a multi-line reason.
const SECTION_LABELS: [&str; 3] = ["filter:", "songs:", "music:"];

/// Lines starting with these are never fallback captions.
const FALLBACK_SKIP_PREFIXES: [&str; 4] = ["reason:", "filter:", "songs:", "music:"];

/// Caption text and rationale before numbering and bias checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCaption {
    pub text: String,
    pub reason: String,
}

/// Reads one caption per section whose first non-blank line carries a `1.`,
/// `2.` or `3.` marker. Output follows section order.
pub fn extract<S: AsRef<str>>(sections: &[S]) -> Vec<RawCaption> {
    sections.iter().filter_map(|s| extract_one(s.as_ref())).collect()
}

fn extract_one(section: &str) -> Option<RawCaption> {
    let mut lines = section.lines().map(str::trim).skip_while(|l| l.is_empty());
    let first = lines.next()?;
    if !CAPTION_MARKER_RE.is_match(first) {
        return None;
    }

    let text = strip_emphasis(&CAPTION_PREFIX_RE.replace(first, ""));
    if text.is_empty() {
        return None;
    }

    Some(RawCaption { text, reason: read_reason(lines) })
}

fn read_reason<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut started = false;

    for line in lines {
        if !started {
            if let Some(m) = REASON_LABEL_RE.find(line) {
                started = true;
                let rest = line[m.end()..].trim();
                if !rest.is_empty() {
                    parts.push(rest);
                }
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }
        let bare = line.to_lowercase().replace('*', "");
        if SECTION_LABELS.iter().any(|label| bare.contains(label)) {
            break;
        }
        parts.push(line);
    }

    parts.join(" ")
}

/// Picks hashtag-bearing lines out of an unstructured response.
///
/// A line qualifies when it is longer than ten characters, does not open with
/// a reason/filter/songs/music label and still holds a `#` once quotes are
/// removed. At most [`FALLBACK_LIMIT`] lines are kept, in text order.
pub fn synthesize_fallback(text: &str) -> Vec<RawCaption> {
    text.lines()
        .map(str::trim)
        .filter(|line| char_len(line) > 10)
        .filter(|line| {
            let lower = line.to_lowercase();
            !FALLBACK_SKIP_PREFIXES.iter().any(|p| lower.starts_with(p))
        })
        .map(|line| strip_quotes(line).trim().to_string())
        .filter(|clean| clean.contains('#'))
        .take(FALLBACK_LIMIT)
        .map(|text| RawCaption { text, reason: FALLBACK_REASON.to_string() })
        .collect()
}
