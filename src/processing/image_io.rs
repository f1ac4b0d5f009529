//! # Image I/O
//!
//! Loading, saving and flattening of PNG/BMP carrier images. Every image is
//! converted to 8-bit RGB so the channel buffer is always
//! `width * height * 3` bytes in row-major R, G, B order.

use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::common::config::CodecConfig;
use crate::processing::capacity::capacity;

/// Channels per pixel in the flattened buffer.
pub const CHANNELS_PER_PIXEL: usize = 3;

/// Errors raised while reading or writing carrier images.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported image format. Supported: PNG, BMP")]
    UnsupportedFormat,

    #[error("Channel buffer of {len} bytes does not match a {width}x{height} RGB image")]
    DimensionMismatch { len: usize, width: u32, height: u32 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map a file extension (without dot, any case) to a supported format.
pub fn format_from_extension(extension: &str) -> Option<ImageFormat> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some(ImageFormat::Png),
        "bmp" => Some(ImageFormat::Bmp),
        _ => None,
    }
}

/// Supported format for `path`, decided by its extension.
pub fn format_from_path(path: &Path) -> Result<ImageFormat, ImageIoError> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(format_from_extension)
        .ok_or(ImageIoError::UnsupportedFormat)
}

/// Load a PNG or BMP image from disk as RGB.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage, ImageIoError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImageIoError::NotFound(path.to_path_buf()));
    }
    let format = format_from_path(path)?;
    let bytes = std::fs::read(path)?;
    load_image_from_memory(&bytes, format)
}

/// Decode uploaded image bytes of a known format as RGB.
pub fn load_image_from_memory(bytes: &[u8], format: ImageFormat) -> Result<RgbImage, ImageIoError> {
    let image = image::load_from_memory_with_format(bytes, format)?;
    Ok(image.to_rgb8())
}

/// Save an image, picking PNG or BMP from the output extension.
pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let format = format_from_path(path)?;
    image.save_with_format(path, format)?;
    Ok(())
}

/// Encode an image into an in-memory PNG or BMP file.
pub fn encode_image(image: &RgbImage, format: ImageFormat) -> Result<Vec<u8>, ImageIoError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format)?;
    Ok(bytes)
}

/// Flatten an image into its channel values, row-major, R, G, B per pixel.
pub fn channels_of(image: &RgbImage) -> Vec<u8> {
    image.as_raw().clone()
}

/// Rebuild an image from flattened channel values.
pub fn image_from(channels: Vec<u8>, width: u32, height: u32) -> Result<RgbImage, ImageIoError> {
    let len = channels.len();
    RgbImage::from_raw(width, height, channels).ok_or(ImageIoError::DimensionMismatch {
        len,
        width,
        height,
    })
}

/// Image dimensions as `(width, height)`.
pub fn pixel_count(image: &RgbImage) -> (u32, u32) {
    image.dimensions()
}

/// Capacity of `image` in bytes, see [`capacity`].
pub fn image_capacity(config: &CodecConfig, image: &RgbImage) -> i64 {
    let (width, height) = pixel_count(image);
    capacity(config, width as usize * height as usize * CHANNELS_PER_PIXEL)
}
