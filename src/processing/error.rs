//! Error types for the steganography codec.

use thiserror::Error;

/// Errors produced by the codec core.
///
/// Encoding can only fail on capacity and decoding collapses every structural
/// problem into [`StegoError::MalformedFrame`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// The frame does not fit in the carrier image.
    #[error("Message too large. Image capacity: {capacity} bytes, message + metadata size: {required} bytes")]
    CapacityExceeded { capacity: i64, required: usize },

    /// The channel LSBs do not hold a well-formed frame.
    #[error("Failed to decode message from image")]
    MalformedFrame,
}
