//! # Command Line Operations
//!
//! The `hide`, `extract` and `capacity` commands behind the `hide-npng`
//! binary. Each command returns a report so the binary decides what to print
//! and tests can inspect the outcome.

use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::config::CodecConfig;
use crate::processing::image_io::{image_capacity, load_image, pixel_count, save_image};
use crate::processing::steganography::{extract_from_image, hide_in_image};

/// Outcome of [`hide_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HideReport {
    pub output_path: PathBuf,
    pub capacity: i64,
    pub document_size: usize,
    pub extension: Option<String>,
}

/// Outcome of [`extract_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    pub output_path: PathBuf,
    pub document_size: usize,
    pub extension: Option<String>,
}

/// Outcome of [`capacity_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityReport {
    pub width: u32,
    pub height: u32,
    pub capacity: i64,
}

/// Hide the document at `document_path` inside the image at `image_path`.
///
/// The document's extension is stored alongside it. Without `output_path`
/// the result is written next to the image as `<stem>_hidden.<ext>`.
pub fn hide_command(
    config: &CodecConfig,
    image_path: &Path,
    document_path: &Path,
    output_path: Option<&Path>,
) -> Result<HideReport> {
    info!("Loading image: {}", image_path.display());
    let image = load_image(image_path)?;

    let capacity = image_capacity(config, &image);
    info!("Image capacity: {} bytes", capacity.max(0));

    info!("Reading document: {}", document_path.display());
    if !document_path.exists() {
        bail!("File not found: {}", document_path.display());
    }
    let document = fs::read(document_path)
        .with_context(|| format!("Failed to read {}", document_path.display()))?;
    info!("Document size: {} bytes", document.len());

    let extension = document_path
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string);

    let extension_overhead = extension.as_ref().map_or(1, |ext| ext.len() + 1);
    let total = document.len() + extension_overhead;
    if total as i64 > capacity {
        bail!(
            "Document too large for image.\n  Document size: {} bytes\n  Extension metadata: {} bytes\n  Total: {} bytes\n  Image capacity: {} bytes",
            document.len(),
            extension_overhead,
            total,
            capacity
        );
    }

    info!("Encoding message into image...");
    let hidden = hide_in_image(config, &image, &document, extension.as_deref())?;

    let output_path = match output_path {
        Some(path) => path.to_path_buf(),
        None => sibling_with_suffix(image_path, "_hidden", image_path.extension()),
    };
    info!("Saving modified image: {}", output_path.display());
    save_image(&hidden, &output_path)?;

    Ok(HideReport {
        output_path,
        capacity,
        document_size: document.len(),
        extension,
    })
}

/// Extract the hidden document from the image at `image_path`.
///
/// Without `output_path` the document is written next to the image as
/// `<stem>_extracted`, with the stored extension restored when present.
pub fn extract_command(
    config: &CodecConfig,
    image_path: &Path,
    output_path: Option<&Path>,
) -> Result<ExtractReport> {
    info!("Loading image: {}", image_path.display());
    let image = load_image(image_path)?;

    info!("Decoding message from image...");
    let (document, extension) = extract_from_image(config, &image)?;
    info!("Extracted message size: {} bytes", document.len());

    let output_path = match output_path {
        Some(path) => path.to_path_buf(),
        None => {
            let restored = extension.as_deref().filter(|ext| is_plain_extension(ext));
            if extension.is_some() && restored.is_none() {
                warn!("Ignoring stored extension {:?}: not a plain file extension", extension);
            }
            if let Some(ext) = restored {
                info!("Using restored extension: .{}", ext);
            }
            sibling_with_suffix(image_path, "_extracted", restored.map(OsStr::new))
        }
    };

    info!("Saving extracted document: {}", output_path.display());
    fs::write(&output_path, &document)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(ExtractReport {
        output_path,
        document_size: document.len(),
        extension,
    })
}

/// Report the dimensions and capacity of the image at `image_path`.
pub fn capacity_command(config: &CodecConfig, image_path: &Path) -> Result<CapacityReport> {
    let image = load_image(image_path)?;
    let (width, height) = pixel_count(&image);
    Ok(CapacityReport {
        width,
        height,
        capacity: image_capacity(config, &image),
    })
}

/// `dir/photo.png` + `_hidden` → `dir/photo_hidden.png`
fn sibling_with_suffix(path: &Path, suffix: &str, extension: Option<&OsStr>) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("output");
    let mut name = format!("{}{}", stem, suffix);
    if let Some(ext) = extension.and_then(OsStr::to_str) {
        name.push('.');
        name.push_str(ext);
    }
    path.with_file_name(name)
}

/// A stored extension is only reused in a filename if it cannot escape the
/// target directory.
fn is_plain_extension(extension: &str) -> bool {
    !extension.is_empty()
        && extension != ".."
        && !extension.contains(['/', '\\', '\0'])
}
