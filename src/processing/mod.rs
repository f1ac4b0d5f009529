//! # Image Processing and Steganography
//!
//! This module hides documents in images using LSB (Least Significant Bit)
//! steganography and provides the PNG/BMP image I/O around it.

pub mod bit_channel;
pub mod capacity;
pub mod error;
pub mod frame;
pub mod image_io;
pub mod steganography;

// Re-export main functions for convenience
pub use steganography::{
    capacity, decode, encode, encode_in_place, extract_from_image, hide_in_image, StegoError,
};
