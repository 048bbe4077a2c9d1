use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::gemini::{CaptionModel, GeminiError};
use crate::models::{CaptionRequest, ParseResult};
use crate::parser::ResponseParser;
use crate::prompt::build_prompt;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("AI model request failed: {0}")]
    Model(#[from] GeminiError),
    #[error("The AI response did not contain any usable captions")]
    NoCaptions,
}

/// Prompt → model → parser.
#[derive(Clone)]
pub struct CaptionService {
    model: Arc<dyn CaptionModel>,
    parser: ResponseParser,
}

impl CaptionService {
    pub fn new(model: Arc<dyn CaptionModel>, parser: ResponseParser) -> Self {
        Self { model, parser }
    }

    pub async fn generate(&self, request: &CaptionRequest) -> Result<ParseResult, GenerationError> {
        let prompt = build_prompt(request);
        info!("🎯 Generating {} {} captions for {}", request.length, request.style, request.image.file_name);

        let text = self.model.generate(&prompt, &request.image).await?;
        let result = self.parser.parse(&text);

        if result.captions.is_empty() {
            warn!("⚠️ No captions recovered from a {} char response", text.len());
            return Err(GenerationError::NoCaptions);
        }

        let flagged = result.captions.iter().filter(|c| c.has_bias_warning).count();
        info!(
            "✅ Parsed {} captions ({} flagged), filter: {}, {} songs",
            result.captions.len(),
            flagged,
            result.filter.as_ref().map_or("none", |f| f.name.as_str()),
            result.songs.len()
        );
        Ok(result)
    }
}
