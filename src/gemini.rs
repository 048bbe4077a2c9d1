use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use crate::config::GeminiConfig;
use crate::models::ImageUpload;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("API returned status {status}: {body}")] Status { status: u16, body: String },
    #[error("parse error: {0}")] Decode(String),
    #[error("no text content in response")] Empty,
}

/// A multimodal model that answers a prompt about an image with free text.
#[async_trait]
pub trait CaptionModel: Send + Sync {
    async fn generate(&self, prompt: &str, image: &ImageUpload) -> Result<String, GeminiError>;
}

pub const DEMO_KEY: &str = "DEMO_KEY";

const DEMO_RESPONSE: &str = "1. Sunset chasing 🌅 #vibes
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

fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...[{} chars]", head, text.chars().count())
    }
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeminiError::Http(e.to_string()))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn is_demo(&self) -> bool {
        self.api_key == DEMO_KEY
    }

    fn request_body(prompt: &str, image: &ImageUpload) -> serde_json::Value {
        let data = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
        json!({
            "contents": [{
                "parts": [
                    {"text": prompt},
                    {"inline_data": {"mime_type": image.mime_type, "data": data}}
                ]
            }],
            "generationConfig": {
                "temperature": 0.9,
                "topP": 0.95,
                "candidateCount": 1
            }
        })
    }

    async fn perform_api_call(&self, prompt: &str, image: &ImageUpload) -> Result<String, GeminiError> {
        let url = format!("{}/models/{}:generateContent?key={}", self.base_url, self.model, self.api_key);
        info!("🔗 Making request to: {}", url.replace(&self.api_key, "***"));
        info!("📤 Prompt: {}", preview(prompt, 120));

        let response = self.client
            .post(&url)
            .json(&Self::request_body(prompt, image))
            .send()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let response_text = response.text().await.map_err(|e| GeminiError::Http(e.to_string()))?;
        if !status.is_success() {
            error!("❌ API Error response: {}", response_text);
            return Err(GeminiError::Status { status: status.as_u16(), body: response_text });
        }

        let parsed: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| GeminiError::Decode(format!("{}: {}", e, preview(&response_text, 200))))?;

        extract_text(&parsed).ok_or(GeminiError::Empty)
    }
}

#[async_trait]
impl CaptionModel for GeminiClient {
    async fn generate(&self, prompt: &str, image: &ImageUpload) -> Result<String, GeminiError> {
        if self.is_demo() {
            info!("Using demo mode - returning canned caption response");
            return Ok(DEMO_RESPONSE.to_string());
        }

        info!("Generating captions with Gemini API ({} bytes of {})...", image.bytes.len(), image.mime_type);
        let result = self.perform_api_call(prompt, image).await;
        match &result {
            Ok(text) => info!("✅ Model responded ({} chars)", text.len()),
            Err(e) => error!("❌ Caption generation failed: {}", e),
        }
        result
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    Other(serde_json::Value),
}

/// Joins the text parts of the first candidate that has any.
fn extract_text(resp: &GeminiResponse) -> Option<String> {
    resp.candidates.iter().find_map(|c| {
        let texts: Vec<&str> = c.content.parts.iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::Other(_) => None,
            })
            .collect();
        if texts.is_empty() { None } else { Some(texts.concat()) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn image() -> ImageUpload {
        ImageUpload { file_name: "p.png".into(), mime_type: "image/png".into(), bytes: Bytes::from_static(b"abc") }
    }

    #[test]
    fn request_carries_prompt_and_inline_image() {
        let body = GeminiClient::request_body("caption this", &image());
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "caption this");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "YWJj");
    }

    #[test]
    fn text_parts_are_concatenated() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"1. Hi"},{"inlineData":{"data":"x"}},{"text":"\nReason: yo"}]}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(&parsed).as_deref(), Some("1. Hi\nReason: yo"));
    }

    #[test]
    fn no_text_is_none() {
        let parsed: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(&parsed), None);
    }

    #[tokio::test]
    async fn demo_mode_returns_parsable_template() {
        let client = GeminiClient::new(&GeminiConfig::default()).unwrap();
        let text = client.generate("prompt", &image()).await.unwrap();
        let result = crate::parser::parse(&text);
        assert_eq!(result.captions.len(), 3);
        assert_eq!(result.songs.len(), 3);
    }
}
