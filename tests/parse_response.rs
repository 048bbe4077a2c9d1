use caption_studio::models::{ParseResult, ParsedCaption, ParsedFilter, ParsedSong};
use caption_studio::parser::{bias, captions::FALLBACK_REASON, parse, BiasScanner, ResponseParser, DEFAULT_DENYLIST};
use pretty_assertions::assert_eq;

const TEMPLATE_RESPONSE: &str = "1. Sunset chasing 🌅 #vibes
Reason: Captures golden hour mood

2. Living my best life ✨
Reason: Playful and confident

3. Good vibes only 🌴
Reason: Upbeat and simple

Filter: Clarendon
Makes colors pop for outdoor shots

Songs:
- Blinding Lights - The Weeknd
- Levitating - Dua Lipa
- Good 4 U - Olivia Rodrigo";

fn caption(text: &str, reason: &str, order: u32) -> ParsedCaption {
    ParsedCaption { text: text.into(), reason: reason.into(), order, has_bias_warning: false, bias_terms: vec![] }
}

fn song(title: &str, order: u32) -> ParsedSong {
    ParsedSong { title_and_artist: title.into(), order }
}

#[test]
fn template_response_parses_completely() {
    let expected = ParseResult {
        captions: vec![
            caption("Sunset chasing 🌅 #vibes", "Captures golden hour mood", 1),
            caption("Living my best life ✨", "Playful and confident", 2),
            caption("Good vibes only 🌴", "Upbeat and simple", 3),
        ],
        filter: Some(ParsedFilter {
            name: "Clarendon".into(),
            explanation: "Makes colors pop for outdoor shots".into(),
        }),
        songs: vec![
            song("Blinding Lights - The Weeknd", 1),
            song("Levitating - Dua Lipa", 2),
            song("Good 4 U - Olivia Rodrigo", 3),
        ],
    };
    assert_eq!(parse(TEMPLATE_RESPONSE), expected);
}

#[test]
fn parsing_is_repeatable() {
    let parser = ResponseParser::default();
    assert_eq!(parser.parse(TEMPLATE_RESPONSE), parser.parse(TEMPLATE_RESPONSE));
}

#[test]
fn chatty_markdown_response_is_tolerated() {
    let text = "Sure! Here are some captions for your photo:

**1. \u{201C}Chasing waves and sunsets\u{201D} 🌊 #beachlife**
**Reason:** The photo shows the ocean at dusk,
which gives a calm, dreamy feel.

**2.** \"Salt in my hair, sand in my shoes\" #summer
Reason: Playful and relatable.

**3.** Golden hour never disappoints ✨ #goldenhour
Reason: Highlights the lighting.

**Recommended Filter:** Valencia
Warms the tones and softens the highlights.

**Songs:**
- \u{201C}Ocean Eyes\u{201D} - Billie Eilish
- Banana Pancakes - Jack Johnson
- Island In The Sun - Weezer";

    let result = parse(text);
    let texts: Vec<&str> = result.captions.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Chasing waves and sunsets 🌊 #beachlife",
            "Salt in my hair, sand in my shoes #summer",
            "Golden hour never disappoints ✨ #goldenhour",
        ]
    );
    assert_eq!(
        result.captions[0].reason,
        "The photo shows the ocean at dusk, which gives a calm, dreamy feel."
    );
    assert_eq!(
        result.filter,
        Some(ParsedFilter { name: "Valencia".into(), explanation: "Warms the tones and softens the highlights.".into() })
    );
    let songs: Vec<&str> = result.songs.iter().map(|s| s.title_and_artist.as_str()).collect();
    assert_eq!(songs, vec!["Ocean Eyes - Billie Eilish", "Banana Pancakes - Jack Johnson", "Island In The Sun - Weezer"]);
}

#[test]
fn no_markers_and_no_hashtags_means_no_captions() {
    let result = parse("I'm sorry, I can't help with this image.\nPlease try another photo.");
    assert!(result.captions.is_empty());
}

#[test]
fn hashtag_lines_become_fallback_captions() {
    let text = "Caption ideas:
Morning coffee and good books ☕ #slowliving
\"Weekend state of mind\" #weekendvibes
Cozy corners only #hygge
Sundays are for this #sunday";
    let result = parse(text);
    assert_eq!(result.captions.len(), 3);
    assert!(result.captions.iter().all(|c| c.reason == FALLBACK_REASON));
    assert_eq!(result.captions[1].text, "Weekend state of mind #weekendvibes");
    let orders: Vec<u32> = result.captions.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[test]
fn short_song_bullets_leave_songs_empty() {
    let text = "1. Caption #one\nReason: ok\n\nSongs:\n- ab\n- xyz\n\nBonus pick: Yellow - Coldplay";
    assert!(parse(text).songs.is_empty());
}

#[test]
fn instagram_filter_anchor_alone() {
    let result = parse("Instagram Filter: Vivid");
    assert_eq!(result.filter, Some(ParsedFilter { name: "Vivid".into(), explanation: String::new() }));
}

#[test]
fn unlabelled_songs_are_found_by_line_scan() {
    let text = "1. Road trip ready 🚗 #adventure\nReason: Energetic\n\nTry these:\nLife is a Highway - Tom Cochrane\nOn the Road Again - Willie Nelson";
    let songs: Vec<String> = parse(text).songs.into_iter().map(|s| s.title_and_artist).collect();
    assert_eq!(songs, vec!["Life is a Highway - Tom Cochrane", "On the Road Again - Willie Nelson"]);
}

#[test]
fn biased_caption_is_flagged() {
    let result = parse("1. Exotic nights, CRAZY lights #party\nReason: Bold");
    assert!(result.captions[0].has_bias_warning);
    assert_eq!(result.captions[0].bias_terms, vec!["crazy", "exotic"]);
}

#[test]
fn scan_returns_denylist_subset_in_denylist_order() {
    let cases = [
        ("nothing to see", vec![]),
        ("That was LAME", vec!["lame"]),
        ("gypsy tribal crazy", vec!["crazy", "tribal", "gyp"]),
        ("Exotic, lame, Crazy, TRIBAL, gyp", vec!["crazy", "lame", "exotic", "tribal", "gyp"]),
    ];
    for (text, expected) in cases {
        assert_eq!(bias::scan(text, &DEFAULT_DENYLIST), expected, "text: {text}");
    }
}

#[test]
fn configured_denylist_replaces_default() {
    let parser = ResponseParser::new(BiasScanner::new(["vibes"]));
    let result = parser.parse("1. Crazy good vibes #fun\nReason: upbeat");
    assert_eq!(result.captions[0].bias_terms, vec!["vibes"]);
}

#[test]
fn out_of_order_markers_keep_text_order() {
    let result = parse("2. Second idea\nReason: b\n\n1. First idea\nReason: a");
    let texts: Vec<(&str, u32)> = result.captions.iter().map(|c| (c.text.as_str(), c.order)).collect();
    assert_eq!(texts, vec![("Second idea", 1), ("First idea", 2)]);
}

#[test]
fn empty_input_is_not_an_error() {
    assert_eq!(parse(""), ParseResult::default());
    assert_eq!(parse("\n\n   \n"), ParseResult::default());
}
