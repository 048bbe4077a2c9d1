//! Song suggestion recovery.

use once_cell::sync::Lazy;
use regex::Regex;

use super::markup::{char_len, strip_quotes};

/// Labelled bullet blocks, tried in order. Group 1 is the run of bullet lines
/// directly under the label. Bold markers around the label are tolerated.
static SONG_BLOCK_RES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)songs?[:*\s]*\n((?:[-•]\s*.*\n?)*)").unwrap(),
        Regex::new(r"(?i)music[:*\s]*\n((?:[-•]\s*.*\n?)*)").unwrap(),
        Regex::new(r"(?i)tracks?[:*\s]*\n((?:[-•]\s*.*\n?)*)").unwrap(),
    ]
});

const SEPARATOR: &str = " - ";

/// Words that disqualify a line from the loose title/artist scan.
const NON_SONG_WORDS: [&str; 3] = ["filter:", "caption", "explain"];

/// Entries this short are noise, not songs.
const MIN_ENTRY_CHARS: usize = 4;

/// Outcome of the labelled-block search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockScan {
    /// A label matched; holds the usable entries, possibly none.
    Found(Vec<String>),
    /// No songs/music/tracks label was followed by a line break.
    Missing,
}

/// Recovers song suggestions in text order.
///
/// A labelled bullet block takes precedence. Only when no label matched at
/// all does the loose `Title - Artist` line scan run; a block whose bullets
/// were all too short yields no songs.
pub fn extract(text: &str) -> Vec<String> {
    match scan_block(text) {
        BlockScan::Found(songs) => songs,
        BlockScan::Missing => scan_lines(text),
    }
}

/// Reads the first labelled bullet block.
pub fn scan_block(text: &str) -> BlockScan {
    let Some(caps) = SONG_BLOCK_RES.iter().find_map(|re| re.captures(text)) else {
        return BlockScan::Missing;
    };
    let block = caps.get(1).map_or("", |m| m.as_str());

    let songs = block
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix('-').or_else(|| line.strip_prefix('•')))
        .map(|entry| strip_quotes(entry.trim()).trim().to_string())
        .filter(|entry| char_len(entry) >= MIN_ENTRY_CHARS)
        .collect();

    BlockScan::Found(songs)
}

/// Collects every line that looks like `Title - Artist` and is not a reason,
/// filter or caption line.
pub fn scan_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.contains(SEPARATOR))
        .filter(|line| {
            let lower = line.to_lowercase();
            !lower.starts_with("reason:") && !NON_SONG_WORDS.iter().any(|w| lower.contains(w))
        })
        .map(|line| strip_quotes(line).trim().to_string())
        .filter(|entry| char_len(entry) >= MIN_ENTRY_CHARS)
        .collect()
}
