use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use image::ImageFormat;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::{
    errors::{ApiError, FieldErrors},
    models::{ApiResponse, CaptionRecordView, CaptionRequest, Choices, ImageUpload, Length, Style},
    service::CaptionService,
    store::CaptionStore,
};

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
const MAX_SHORT_FIELD_CHARS: usize = 200;
/// Room for the non-image form fields on top of the image limit.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CaptionStore>,
    pub service: Arc<CaptionService>,
    pub max_image_bytes: usize,
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_image_bytes + FORM_OVERHEAD_BYTES;
    Router::new()
        .route("/api/captions/generate", post(generate_captions))
        .route("/api/captions", get(list_caption_requests))
        .route("/api/captions/:id", get(get_caption_request))
        .route("/api/captions/:id/regenerate", post(regenerate_captions))
        .route("/api/captions/:id/delete", delete(delete_caption_request))
        .route("/api/choices", get(get_choices))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

pub async fn generate_captions(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CaptionRecordView>>), ApiError> {
    let request = read_submission(multipart, state.max_image_bytes).await?;
    tracing::info!("📸 New caption request: {} ({} bytes)", request.image.file_name, request.image.bytes.len());

    // Nothing is stored unless generation succeeds.
    let result = state.service.generate(&request).await.map_err(ApiError::Submission)?;
    let record = state.store.insert(request, result);

    tracing::info!("✅ Stored caption request {}", record.id);
    let body = ApiResponse::ok(CaptionRecordView::from(&record)).with_message("Captions generated successfully!");
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn get_caption_request(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CaptionRecordView>>, ApiError> {
    let record = state.store.get(&id).ok_or(ApiError::NotFound)?;
    Ok(Json(ApiResponse::ok(CaptionRecordView::from(&record))))
}

pub async fn list_caption_requests(State(state): State<AppState>) -> Json<ApiResponse<Vec<CaptionRecordView>>> {
    let views: Vec<CaptionRecordView> = state.store.list().iter().map(CaptionRecordView::from).collect();
    let count = views.len();
    Json(ApiResponse::ok(views).with_count(count))
}

pub async fn get_choices() -> Json<ApiResponse<Choices>> {
    Json(ApiResponse::ok(Choices::all()))
}

pub async fn regenerate_captions(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CaptionRecordView>>, ApiError> {
    let record = state.store.clear_result(&id).ok_or(ApiError::NotFound)?;
    tracing::info!("🔄 Regenerating captions for {}", id);

    let result = state.service.generate(&record.request).await?;
    let updated = state.store.save_result(&id, result).ok_or(ApiError::NotFound)?;
    let body = ApiResponse::ok(CaptionRecordView::from(&updated)).with_message("Captions regenerated successfully!");
    Ok(Json(body))
}

pub async fn delete_caption_request(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    state.store.remove(&id).ok_or(ApiError::NotFound)?;
    tracing::info!("🗑️ Deleted caption request {}", id);
    Ok((StatusCode::NO_CONTENT, Json(ApiResponse::done("Caption request deleted successfully"))))
}

// --- Submission parsing ---

#[derive(Default)]
struct Submission {
    image: Option<(String, bytes::Bytes)>,
    style: Option<String>,
    length: Option<String>,
    people: String,
    location: String,
    moment: String,
    sample_captions: String,
}

fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

async fn read_submission(mut multipart: Multipart, max_image_bytes: usize) -> Result<CaptionRequest, ApiError> {
    let mut form = Submission::default();
    let mut errors = FieldErrors::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                push_error(&mut errors, "non_field_errors", e.body_text());
                return Err(ApiError::Validation(errors));
            }
        };
        let name = field.name().unwrap_or_default().to_string();
        let read = if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            field.bytes().await.map(|b| form.image = Some((file_name, b)))
        } else {
            field.text().await.map(|value| match name.as_str() {
                "style" => form.style = Some(value),
                "length" => form.length = Some(value),
                "people" => form.people = value,
                "location" => form.location = value,
                "moment" => form.moment = value,
                "sample_captions" => form.sample_captions = value,
                other => tracing::debug!("ignoring unknown form field {}", other),
            })
        };
        if let Err(e) = read {
            push_error(&mut errors, &name, e.body_text());
        }
    }

    let style = parse_choice::<Style>(form.style.as_deref(), "style", &mut errors);
    let length = parse_choice::<Length>(form.length.as_deref(), "length", &mut errors);
    for (field, value) in [("people", &form.people), ("location", &form.location)] {
        if value.chars().count() > MAX_SHORT_FIELD_CHARS {
            push_error(&mut errors, field, format!("Ensure this field has no more than {MAX_SHORT_FIELD_CHARS} characters."));
        }
    }
    let image = match form.image.take() {
        Some((file_name, bytes)) => validate_image(file_name, bytes, max_image_bytes, &mut errors),
        None => {
            push_error(&mut errors, "image", "No file was submitted.");
            None
        }
    };

    match image {
        Some(image) if errors.is_empty() => Ok(CaptionRequest {
            style,
            length,
            people: form.people,
            location: form.location,
            moment: form.moment,
            sample_captions: form.sample_captions,
            image,
        }),
        _ => Err(ApiError::Validation(errors)),
    }
}

fn parse_choice<T>(raw: Option<&str>, field: &str, errors: &mut FieldErrors) -> T
where
    T: std::str::FromStr + Default,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => T::default(),
        Some(v) => v.parse().unwrap_or_else(|e: T::Err| {
            push_error(errors, field, e.to_string());
            T::default()
        }),
    }
}

fn validate_image(
    file_name: String,
    bytes: bytes::Bytes,
    max_image_bytes: usize,
    errors: &mut FieldErrors,
) -> Option<ImageUpload> {
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()).unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        push_error(
            errors,
            "image",
            format!("File extension \"{extension}\" is not allowed. Allowed extensions are: {}.", ALLOWED_EXTENSIONS.join(", ")),
        );
        return None;
    }
    if bytes.len() > max_image_bytes {
        push_error(
            errors,
            "image",
            format!("Image file too large. Must be under {}MB.", max_image_bytes / (1024 * 1024)),
        );
        return None;
    }
    let format = match image::guess_format(&bytes) {
        Ok(f @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif)) => f,
        _ => {
            push_error(errors, "image", "Upload a valid image. The file you uploaded was either not an image or a corrupted image.");
            return None;
        }
    };
    Some(ImageUpload { file_name, mime_type: format.to_mime_type().to_string(), bytes })
}
