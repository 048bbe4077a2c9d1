use anyhow::{Context, Result};

use crate::gemini::DEMO_KEY;
use crate::parser::DEFAULT_DENYLIST;

pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_KEY.to_string(),
            base_url: DEFAULT_GEMINI_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub gemini: GeminiConfig,
    pub max_image_bytes: usize,
    pub bias_terms: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            gemini: GeminiConfig::default(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            bias_terms: DEFAULT_DENYLIST.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(v) => v.parse().with_context(|| format!("PORT must be a port number, got {v:?}"))?,
            None => defaults.port,
        };
        let timeout_secs = match get("GEMINI_TIMEOUT_SECS") {
            Some(v) => v.parse().with_context(|| format!("GEMINI_TIMEOUT_SECS must be whole seconds, got {v:?}"))?,
            None => defaults.gemini.timeout_secs,
        };
        let max_image_bytes = match get("MAX_IMAGE_BYTES") {
            Some(v) => v.parse().with_context(|| format!("MAX_IMAGE_BYTES must be a byte count, got {v:?}"))?,
            None => defaults.max_image_bytes,
        };
        let bias_terms = match get("BIAS_TERMS") {
            Some(v) => v.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect(),
            None => defaults.bias_terms,
        };

        Ok(Self {
            port,
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY").unwrap_or(defaults.gemini.api_key),
                base_url: get("GEMINI_API_BASE").unwrap_or(defaults.gemini.base_url),
                model: get("GEMINI_MODEL").unwrap_or(defaults.gemini.model),
                timeout_secs,
            },
            max_image_bytes,
            bias_terms,
        })
    }
}
