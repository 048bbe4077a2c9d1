use std::{fmt, str::FromStr};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Funny,
    Poetic,
    Minimal,
    #[default]
    Trendy,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Funny, Style::Poetic, Style::Minimal, Style::Trendy];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Funny => "funny",
            Style::Poetic => "poetic",
            Style::Minimal => "minimal",
            Style::Trendy => "trendy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Style::Funny => "Funny",
            Style::Poetic => "Poetic",
            Style::Minimal => "Minimal",
            Style::Trendy => "Trendy",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl Length {
    pub const ALL: [Length; 3] = [Length::Short, Length::Medium, Length::Long];

    pub fn as_str(self) -> &'static str {
        match self {
            Length::Short => "short",
            Length::Medium => "medium",
            Length::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Length::Short => "Short",
            Length::Medium => "Medium",
            Length::Long => "Long",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidChoice(pub String);

impl FromStr for Style {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

impl FromStr for Length {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Length::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uploaded photo. Bytes are kept for regeneration but never serialized.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct CaptionRequest {
    pub style: Style,
    pub length: Length,
    pub people: String,
    pub location: String,
    pub moment: String,
    pub sample_captions: String,
    pub image: ImageUpload,
}

// --- Parse output ---

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ParsedCaption {
    #[serde(rename = "caption_text")]
    pub text: String,
    pub reason: String,
    pub order: u32,
    pub has_bias_warning: bool,
    pub bias_terms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ParsedFilter {
    #[serde(rename = "filter_name")]
    pub name: String,
    pub explanation: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ParsedSong {
    #[serde(rename = "song_title_artist")]
    pub title_and_artist: String,
    pub order: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
    pub captions: Vec<ParsedCaption>,
    pub filter: Option<ParsedFilter>,
    pub songs: Vec<ParsedSong>,
}

// --- Stored records / API payloads ---

/// A caption request together with its latest generated result.
#[derive(Debug, Clone)]
pub struct CaptionRecord {
    pub id: Uuid,
    pub request: CaptionRequest,
    pub result: ParseResult,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct CaptionRecordView {
    pub id: Uuid,
    pub image: String,
    pub style: Style,
    pub length: Length,
    pub people: String,
    pub location: String,
    pub moment: String,
    pub sample_captions: String,
    pub created_at: DateTime<Utc>,
    pub captions: Vec<ParsedCaption>,
    pub filter: Option<ParsedFilter>,
    pub songs: Vec<ParsedSong>,
}

impl From<&CaptionRecord> for CaptionRecordView {
    fn from(record: &CaptionRecord) -> Self {
        let req = &record.request;
        Self {
            id: record.id,
            image: req.image.file_name.clone(),
            style: req.style,
            length: req.length,
            people: req.people.clone(),
            location: req.location.clone(),
            moment: req.moment.clone(),
            sample_captions: req.sample_captions.clone(),
            created_at: record.created_at,
            captions: record.result.captions.clone(),
            filter: record.result.filter.clone(),
            songs: record.result.songs.clone(),
        }
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub count: Option<usize>,
    pub data: Option<T>,
    pub errors: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, message: None, count: None, data: Some(data), errors: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), count: None, data: None, errors: None }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), count: None, data: None, errors: None }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Choices {
    pub styles: Vec<Choice>,
    pub lengths: Vec<Choice>,
}

impl Choices {
    pub fn all() -> Self {
        Self {
            styles: Style::ALL
                .into_iter()
                .map(|s| Choice { value: s.as_str().into(), label: s.label().into() })
                .collect(),
            lengths: Length::ALL
                .into_iter()
                .map(|l| Choice { value: l.as_str().into(), label: l.label().into() })
                .collect(),
        }
    }
}
