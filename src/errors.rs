use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::models::ApiResponse;
use crate::service::GenerationError;

/// Field name → validation messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Validation(FieldErrors),
    /// Generation failed for a new submission; reported with an empty `errors` list.
    Submission(GenerationError),
    Generation(GenerationError),
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        ApiError::Generation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ApiResponse::failure("Caption request not found"),
            ),
            ApiError::Validation(fields) => {
                let mut body = ApiResponse::failure("Validation errors occurred");
                body.errors = Some(json!(fields));
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Submission(err) => {
                error!("Generation failed for new request: {:?}", err);
                let mut body = ApiResponse::failure(err.to_string());
                body.errors = Some(json!([]));
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Generation(err) => {
                error!("Generation failed: {:?}", err);
                (StatusCode::BAD_REQUEST, ApiResponse::failure(err.to_string()))
            }
        };
        (status, Json(body)).into_response()
    }
}
