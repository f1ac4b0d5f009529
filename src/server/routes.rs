//! HTTP routes for the steganography web API.
//!
//! ```text
//! GET  /api/health          liveness probe
//! POST /api/check-capacity  multipart: image
//! POST /api/hide            multipart: image, document
//! POST /api/extract         multipart: image
//! ```
//!
//! Anything else is served from the static front end directory, falling back
//! to a JSON 404.

use axum::{
    extract::{multipart::{Multipart, MultipartRejection}, DefaultBodyLimit, State},
    handler::HandlerWithoutStateExt,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use image::ImageFormat;
use log::{error, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::processing::image_io::format_from_extension;
use crate::processing::steganography::StegoError;
use crate::server::config::WebConfig;
use crate::server::server::{ServerCore, ServiceError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub struct AppState {
    pub core: ServerCore,
    pub config: WebConfig,
}

/// Build the application router.
pub fn router(config: WebConfig) -> Router {
    let static_files =
        ServeDir::new(&config.server.static_dir).not_found_service(not_found.into_service());
    let body_limit = config.server.max_upload_bytes;

    let state = Arc::new(AppState {
        core: ServerCore::new(config.codec),
        config,
    });

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/check-capacity", post(check_capacity_handler))
        .route("/api/hide", post(hide_handler))
        .route("/api/extract", post(extract_handler))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// An uploaded multipart file.
struct Upload {
    filename: String,
    data: Vec<u8>,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    api_error(StatusCode::NOT_FOUND, "Not found")
}

async fn check_capacity_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut uploads = read_uploads(multipart, &["image"], &state.config).await?;
    let image = uploads
        .remove("image")
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No image uploaded"))?;
    let format = image_format(&image)?;

    let request_id = rand::random::<u64>();
    info!(
        "📤 Capacity check #{} for {} ({} bytes)",
        request_id,
        image.filename,
        image.data.len()
    );

    let report = state
        .core
        .check_capacity(request_id, image.data, format)
        .await
        .map_err(|e| service_error(e, ""))?;

    Ok((StatusCode::OK, Json(report)))
}

async fn hide_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut uploads = read_uploads(multipart, &["image", "document"], &state.config).await?;
    let (image, document) = match (uploads.remove("image"), uploads.remove("document")) {
        (Some(image), Some(document)) => (image, document),
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Missing image or document",
            ))
        }
    };
    if image.filename.is_empty() || document.filename.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "No file selected"));
    }
    let format = image_format(&image)?;
    let extension = file_extension(&document.filename);

    let request_id = rand::random::<u64>();
    info!(
        "📤 Hide #{}: {} ({} bytes) into {} ({} bytes)",
        request_id,
        document.filename,
        document.data.len(),
        image.filename,
        image.data.len()
    );

    let carrier = state
        .core
        .hide_document(request_id, image.data, format, document.data, extension)
        .await
        .map_err(|e| service_error(e, ""))?;

    let output_name = hidden_filename(&image.filename);
    let content_type = match format {
        ImageFormat::Bmp => "image/bmp",
        _ => "image/png",
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, attachment(&output_name)),
        ],
        carrier,
    ))
}

async fn extract_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut uploads = read_uploads(multipart, &["image"], &state.config).await?;
    let image = uploads
        .remove("image")
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No image uploaded"))?;
    let format = image_format(&image)?;

    let request_id = rand::random::<u64>();
    info!(
        "📤 Extract #{} from {} ({} bytes)",
        request_id,
        image.filename,
        image.data.len()
    );

    let (document, extension) = state
        .core
        .extract_document(request_id, image.data, format)
        .await
        .map_err(|e| service_error(e, "Failed to extract: "))?;

    let output_name = match extension {
        Some(ext) => format!("extracted_document.{}", ext),
        None => "extracted_document".to_string(),
    };

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (header::CONTENT_DISPOSITION, attachment(&output_name)),
        ],
        document,
    ))
}

/// Collect the named file fields of a multipart body.
///
/// Unknown fields are skipped. A body over the configured limit maps to 413.
/// A request that is not multipart at all carries no files, so each route
/// reports its own missing-file error.
async fn read_uploads(
    multipart: Result<Multipart, MultipartRejection>,
    wanted: &[&str],
    config: &WebConfig,
) -> Result<HashMap<String, Upload>, ApiError> {
    let too_large = format!(
        "File too large. Maximum: {}",
        describe_size(config.server.max_upload_bytes)
    );
    let mut uploads = HashMap::new();

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!("⚠️ Request without multipart files: {}", rejection.body_text());
            return Ok(uploads);
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            api_error(StatusCode::PAYLOAD_TOO_LARGE, too_large.clone())
        } else {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart data: {}", e),
            )
        }
    })? {
        let name = field.name().unwrap_or("").to_string();
        if !wanted.contains(&name.as_str()) {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                api_error(StatusCode::PAYLOAD_TOO_LARGE, too_large.clone())
            } else {
                api_error(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read {} data: {}", name, e),
                )
            }
        })?;

        uploads.insert(
            name,
            Upload {
                filename,
                data: data.to_vec(),
            },
        );
    }

    Ok(uploads)
}

/// Validate an uploaded image's filename and return its format.
fn image_format(upload: &Upload) -> Result<ImageFormat, ApiError> {
    if upload.filename.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "No file selected"));
    }
    file_extension(&upload.filename)
        .and_then(|ext| format_from_extension(&ext))
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                "Invalid image format. Use PNG or BMP.",
            )
        })
}

fn service_error(err: ServiceError, prefix: &str) -> ApiError {
    match err {
        ServiceError::Stego(e @ StegoError::CapacityExceeded { .. }) => {
            warn!("⚠️ {}", e);
            api_error(StatusCode::BAD_REQUEST, e.to_string())
        }
        ServiceError::Stego(e @ StegoError::MalformedFrame) => {
            warn!("⚠️ {}", e);
            api_error(StatusCode::BAD_REQUEST, format!("{}{}", prefix, e))
        }
        e => {
            error!("❌ Request failed: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Extension of `filename` without the dot, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
}

/// `photo.png` → `photo_hidden.png`
pub fn hidden_filename(filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_hidden.{}", stem, ext),
        None => format!("{}_hidden", stem),
    }
}

/// Reduce a client-supplied filename to a safe ASCII name.
///
/// Keeps ASCII letters, digits, `.`, `-` and `_`, turns whitespace into `_`,
/// drops everything else and strips leading dots.
pub fn secure_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `52428800` → `50MB`, anything not a whole number of MiB stays in bytes.
fn describe_size(bytes: usize) -> String {
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// `Content-Disposition` for a download named `filename`.
///
/// `filename` carries a sanitized ASCII name; when that loses anything,
/// `filename*` carries the full name as RFC 5987 UTF-8.
fn attachment(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let fallback = secure_filename(name);
    if fallback == name {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            encode_ext_value(name)
        )
    }
}

/// Percent-encode everything outside RFC 5987 `attr-char`.
fn encode_ext_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric()
            || matches!(
                byte,
                b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
            )
        {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}
