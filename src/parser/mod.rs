//! Turns a free-text model response into captions, a filter and songs.
//!
//! Every stage is a pure function over the raw text and degrades to an empty
//! result instead of failing: model output drifts from the requested format
//! all the time, and whatever can be recovered is kept.

pub mod bias;
pub mod captions;
pub mod filter;
mod markup;
pub mod sections;
pub mod songs;

use tracing::{debug, instrument, trace};

use crate::models::{ParseResult, ParsedCaption, ParsedFilter, ParsedSong};

pub use bias::{BiasScanner, DEFAULT_DENYLIST};

/// Response parser bound to a bias denylist.
#[derive(Debug, Clone, Default)]
pub struct ResponseParser {
    scanner: BiasScanner,
}

impl ResponseParser {
    pub fn new(scanner: BiasScanner) -> Self {
        Self { scanner }
    }

    pub fn scanner(&self) -> &BiasScanner {
        &self.scanner
    }

    /// Parses one model response. Never fails; empty input gives an empty
    /// result.
    #[instrument(level = "debug", skip_all, fields(chars = raw.len()))]
    pub fn parse(&self, raw: &str) -> ParseResult {
        trace!(raw, "parsing model response");

        let sections = sections::split(raw);
        debug!(sections = sections.len(), "split response");

        let mut recovered = captions::extract(&sections);
        if recovered.is_empty() {
            recovered = captions::synthesize_fallback(raw);
            debug!(count = recovered.len(), "no numbered captions, used hashtag fallback");
        }

        let captions: Vec<ParsedCaption> = recovered
            .into_iter()
            .zip(1..)
            .map(|(c, order)| {
                let bias_terms = self.scanner.scan(&c.text);
                ParsedCaption {
                    text: c.text,
                    reason: c.reason,
                    order,
                    has_bias_warning: !bias_terms.is_empty(),
                    bias_terms,
                }
            })
            .collect();

        for c in &captions {
            debug!(order = c.order, caption = %c.text, reason = %c.reason, bias = ?c.bias_terms, "caption");
        }

        let filter = filter::extract(raw).map(|f| ParsedFilter { name: f.name, explanation: f.explanation });
        debug!(filter = ?filter.as_ref().map(|f| f.name.as_str()), "filter");

        let songs: Vec<ParsedSong> = songs::extract(raw)
            .into_iter()
            .zip(1..)
            .map(|(title_and_artist, order)| ParsedSong { title_and_artist, order })
            .collect();
        debug!(captions = captions.len(), songs = songs.len(), "parsed response");

        ParseResult { captions, filter, songs }
    }
}

/// Parses with the default denylist.
pub fn parse(raw: &str) -> ParseResult {
    ResponseParser::default().parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_gives_empty_result() {
        assert_eq!(parse(""), ParseResult::default());
    }

    #[test]
    fn bias_fields_are_filled_per_caption() {
        let result = parse("1. A crazy exotic trip #travel\nReason: fun\n\n2. Calm seas\nReason: serene");
        assert_eq!(result.captions[0].bias_terms, vec!["crazy", "exotic"]);
        assert!(result.captions[0].has_bias_warning);
        assert!(!result.captions[1].has_bias_warning);
        assert!(result.captions[1].bias_terms.is_empty());
    }

    #[test]
    fn fallback_captions_are_numbered_from_one() {
        let result = parse("Here you go!\nSunday brunch goals #foodie\nLazy mornings forever #weekend");
        let orders: Vec<u32> = result.captions.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(result.captions[0].reason, captions::FALLBACK_REASON);
    }

    #[test]
    fn custom_denylist_flows_through() {
        let parser = ResponseParser::new(BiasScanner::new(["sunset"]));
        assert_eq!(parser.scanner().terms(), ["sunset"]);
        let result = parser.parse("1. Sunset chasing\nReason: golden");
        assert_eq!(result.captions[0].bias_terms, vec!["sunset"]);
    }
}
