use std::collections::HashMap;

use caption_studio::config::{AppConfig, DEFAULT_GEMINI_BASE, DEFAULT_MAX_IMAGE_BYTES};
use caption_studio::gemini::DEMO_KEY;
use pretty_assertions::assert_eq;

fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = load(&[]).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.gemini.api_key, DEMO_KEY);
    assert_eq!(config.gemini.base_url, DEFAULT_GEMINI_BASE);
    assert_eq!(config.max_image_bytes, DEFAULT_MAX_IMAGE_BYTES);
    assert_eq!(config.bias_terms, vec!["crazy", "lame", "exotic", "tribal", "gyp"]);
}

#[test]
fn reads_overrides() {
    let config = load(&[
        ("PORT", "9000"),
        ("GEMINI_API_KEY", "abc123"),
        ("GEMINI_API_BASE", "http://localhost:1234"),
        ("GEMINI_MODEL", "gemini-2.0-flash"),
        ("GEMINI_TIMEOUT_SECS", "5"),
        ("MAX_IMAGE_BYTES", "1024"),
        ("BIAS_TERMS", " wild , ,savage"),
    ])
    .unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.gemini.api_key, "abc123");
    assert_eq!(config.gemini.base_url, "http://localhost:1234");
    assert_eq!(config.gemini.model, "gemini-2.0-flash");
    assert_eq!(config.gemini.timeout_secs, 5);
    assert_eq!(config.max_image_bytes, 1024);
    assert_eq!(config.bias_terms, vec!["wild", "savage"]);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = load(&[("GEMINI_API_KEY", "  "), ("PORT", "")]).unwrap();
    assert_eq!(config.gemini.api_key, DEMO_KEY);
    assert_eq!(config.port, 8080);
}

#[test]
fn bad_numbers_are_errors() {
    let err = load(&[("PORT", "eighty")]).unwrap_err();
    assert!(err.to_string().contains("PORT"));
    assert!(load(&[("MAX_IMAGE_BYTES", "-1")]).is_err());
}
