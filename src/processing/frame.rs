//! # Payload Frame
//!
//! The frame is the self-describing byte layout written into the channel LSBs:
//!
//! ```text
//! [1 byte  ] extension length N (0 = no extension)
//! [N bytes ] extension, UTF-8, no leading dot
//! [4 bytes ] message length M (big-endian)
//! [M bytes ] message
//! ```
//!
//! The width of the length field comes from [`CodecConfig`]; four bytes by
//! default.

use crate::common::config::CodecConfig;
use crate::processing::bit_channel::BitReader;
use crate::processing::error::StegoError;

/// Payload and extension recovered from a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub payload: Vec<u8>,
    pub extension: Option<String>,
}

/// Normalize an extension into the bytes stored in the frame.
///
/// Strips one leading `.` and truncates the UTF-8 encoding to
/// `max_extension_bytes`. Truncation is byte-level and may split a
/// multi-byte character.
pub fn normalize_extension(config: &CodecConfig, extension: &str) -> Vec<u8> {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    let bytes = extension.as_bytes();
    bytes[..bytes.len().min(config.max_extension_bytes())].to_vec()
}

/// Build the frame bytes for `payload` and an optional extension.
///
/// Does not check capacity; see [`super::steganography::encode`].
pub fn build_frame(config: &CodecConfig, payload: &[u8], extension: Option<&str>) -> Vec<u8> {
    let ext_bytes = extension
        .map(|ext| normalize_extension(config, ext))
        .unwrap_or_default();

    let length_bytes = (payload.len() as u64).to_be_bytes();
    let length_field = &length_bytes[length_bytes.len() - config.length_field_bytes()..];

    let mut frame =
        Vec::with_capacity(1 + ext_bytes.len() + length_field.len() + payload.len());
    // normalize_extension caps the length at 255
    frame.push(ext_bytes.len() as u8);
    frame.extend_from_slice(&ext_bytes);
    frame.extend_from_slice(length_field);
    frame.extend_from_slice(payload);
    frame
}

/// Parse a frame from the channel LSBs.
///
/// Any inconsistency (short buffer, invalid UTF-8 extension, zero or
/// oversized message length) yields [`StegoError::MalformedFrame`].
pub fn parse_frame(config: &CodecConfig, reader: &mut BitReader<'_>) -> Result<DecodedFrame, StegoError> {
    let ext_len = reader.read_byte().ok_or(StegoError::MalformedFrame)? as usize;

    let extension = if ext_len > 0 {
        let ext_bytes = reader
            .read_bytes(ext_len)
            .ok_or(StegoError::MalformedFrame)?;
        Some(String::from_utf8(ext_bytes).map_err(|_| StegoError::MalformedFrame)?)
    } else {
        None
    };

    let length_field = reader
        .read_bytes(config.length_field_bytes())
        .ok_or(StegoError::MalformedFrame)?;
    let msg_len = length_field
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64);

    let max_len = (reader.remaining() / 8) as u64;
    if msg_len == 0 || msg_len > max_len {
        return Err(StegoError::MalformedFrame);
    }

    let payload = reader
        .read_bytes(msg_len as usize)
        .ok_or(StegoError::MalformedFrame)?;

    Ok(DecodedFrame { payload, extension })
}
