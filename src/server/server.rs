//! # Server Core - Steganography Service
//!
//! The core server component is responsible for ONE thing: running the
//! steganography codec on uploaded images. It receives raw upload bytes and
//! returns carrier images or recovered documents.
//!
//! HTTP concerns (multipart parsing, status codes, headers) are handled by
//! the [`routes`](super::routes) layer.

use image::ImageFormat;
use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::common::config::CodecConfig;
use crate::processing::image_io::{
    encode_image, image_capacity, load_image_from_memory, pixel_count, ImageIoError,
};
use crate::processing::steganography::{self, StegoError};

/// Errors surfaced by [`ServerCore`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Stego(#[from] StegoError),

    #[error(transparent)]
    Image(#[from] ImageIoError),

    #[error("Steganography task panicked: {0}")]
    TaskFailed(String),
}

/// Capacity figures for an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityReport {
    pub capacity: i64,
    pub width: u32,
    pub height: u32,
    pub total_pixels: u64,
}

/// Core server component that performs the steganography work.
///
/// This struct is intentionally simple - it only knows how to hide and
/// extract documents. The routes layer handles everything HTTP.
pub struct ServerCore {
    codec: CodecConfig,
}

impl ServerCore {
    /// Create a new server core with the codec settings it will pass to
    /// every call.
    pub fn new(codec: CodecConfig) -> Self {
        Self { codec }
    }

    /// Report how many bytes an uploaded image can carry.
    pub async fn check_capacity(
        &self,
        request_id: u64,
        image_data: Vec<u8>,
        format: ImageFormat,
    ) -> Result<CapacityReport, ServiceError> {
        let codec = self.codec;
        let report = run_blocking(move || {
            let image = load_image_from_memory(&image_data, format)?;
            let (width, height) = pixel_count(&image);
            Ok(CapacityReport {
                capacity: image_capacity(&codec, &image),
                width,
                height,
                total_pixels: width as u64 * height as u64,
            })
        })
        .await?;

        info!(
            "📏 Request #{}: {}x{} image, capacity {} bytes",
            request_id, report.width, report.height, report.capacity
        );
        Ok(report)
    }

    /// Hide `document` in the uploaded image.
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)`: Carrier image bytes, encoded in the upload's format
    /// - `Err`: The image could not be decoded or the document does not fit
    pub async fn hide_document(
        &self,
        request_id: u64,
        image_data: Vec<u8>,
        format: ImageFormat,
        document: Vec<u8>,
        extension: Option<String>,
    ) -> Result<Vec<u8>, ServiceError> {
        info!(
            "📷 Request #{}: hiding {} bytes (extension {:?})",
            request_id,
            document.len(),
            extension
        );

        let codec = self.codec;
        let carrier = run_blocking(move || {
            let image = load_image_from_memory(&image_data, format)?;
            let hidden =
                steganography::hide_in_image(&codec, &image, &document, extension.as_deref())?;
            Ok(encode_image(&hidden, format)?)
        })
        .await?;

        info!(
            "✅ Request #{}: carrier image ready ({} bytes)",
            request_id,
            carrier.len()
        );
        Ok(carrier)
    }

    /// Recover the document hidden in the uploaded image.
    pub async fn extract_document(
        &self,
        request_id: u64,
        image_data: Vec<u8>,
        format: ImageFormat,
    ) -> Result<(Vec<u8>, Option<String>), ServiceError> {
        let codec = self.codec;
        let (document, extension) = run_blocking(move || {
            let image = load_image_from_memory(&image_data, format)?;
            Ok(steganography::extract_from_image(&codec, &image)?)
        })
        .await?;

        info!(
            "✅ Request #{}: extracted {} bytes (extension {:?})",
            request_id,
            document.len(),
            extension
        );
        Ok((document, extension))
    }
}

/// Run CPU-bound codec work on the blocking pool so the async runtime keeps
/// serving other requests.
async fn run_blocking<T, F>(work: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServiceError::TaskFailed(e.to_string()))?
}
