//! Router and request handlers.

use crate::AppError;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use taleweaver_core::{ImageMediaType, ReferenceImage};
use taleweaver_error::{ValidationError, ValidationErrorKind};
use taleweaver_interface::ImageGenerator;
use taleweaver_models::{ProxyResponse, ServerConfig};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, warn};

/// Path of the image generation endpoint.
pub const GENERATE_IMAGE_PATH: &str = "/api/generate-image";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    /// Wrap the generator requests are forwarded to.
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.generator.provider_name())
            .finish()
    }
}

/// Creates the proxy router.
///
/// Request bodies above `config.max_upload_bytes` are rejected with 413.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            GENERATE_IMAGE_PATH,
            post(generate_image).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::new(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

async fn method_not_allowed() -> AppError {
    AppError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Handler panicked");
    AppError::internal("Internal server error").into_response()
}

/// Fields collected from the multipart body.
#[derive(Debug, Default)]
struct GenerateForm {
    prompt: Option<String>,
    image: Option<ReferenceImage>,
    style: Option<String>,
}

impl GenerateForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "prompt" => form.prompt = Some(field.text().await?),
                "style" => form.style = Some(field.text().await?),
                "childImage" => form.image = Some(read_image(field).await?),
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }
        Ok(form)
    }

    /// Prompt and image, or a 400 naming the first absent field.
    fn required(self) -> Result<(String, ReferenceImage, Option<String>), ValidationError> {
        let prompt = self
            .prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::MissingField("prompt".to_string())))?;
        let image = self.image.ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::MissingField("childImage".to_string()))
        })?;
        Ok((prompt, image, self.style))
    }
}

/// Read the reference photo, typed by its declared content type. Parts sent
/// without one (or as `application/octet-stream`) are typed by file extension.
async fn read_image(field: Field<'_>) -> Result<ReferenceImage, AppError> {
    let content_type = field
        .content_type()
        .filter(|ct| *ct != "application/octet-stream")
        .map(str::to_string);
    let media_type = match content_type.as_deref() {
        Some(ct) => ImageMediaType::from_mime(ct),
        None => field
            .file_name()
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| ImageMediaType::from_extension(ext)),
    }
    .ok_or_else(|| {
        ValidationError::new(ValidationErrorKind::UnsupportedMediaType(
            content_type.clone().unwrap_or_else(|| "unknown".to_string()),
        ))
    })?;

    let bytes = field.bytes().await?;
    if bytes.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::EmptyImage).into());
    }
    Ok(ReferenceImage::new(bytes.to_vec(), media_type))
}

/// Generate one illustration from a prompt and a reference photo.
#[instrument(skip_all)]
async fn generate_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProxyResponse>, AppError> {
    let multipart = multipart.inspect_err(|e| warn!(error = %e, "Rejected non-multipart request"))?;
    let (prompt, image, style) = GenerateForm::read(multipart)
        .await
        .inspect_err(|e| warn!(status = %e.status, error = %e.message, "Rejected malformed request"))?
        .required()
        .inspect_err(|e| warn!(error = %e, "Rejected incomplete request"))?;

    debug!(
        prompt_len = prompt.len(),
        media_type = %image.media_type(),
        image_bytes = image.len(),
        style = ?style,
        "Generating image"
    );

    let url = state
        .generator
        .generate_image(&prompt, &image)
        .await
        .inspect_err(|e| error!(error = %e, "Image generation failed"))?;

    info!(url = %url, provider = state.generator.provider_name(), "Image generated");
    Ok(Json(ProxyResponse {
        image_url: Some(url),
        error: None,
    }))
}
