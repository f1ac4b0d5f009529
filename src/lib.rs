//! # hide-npng
//!
//! Hide documents in PNG/BMP images with LSB steganography, and get them back.
//!
//! - [`processing`]: the codec (frame layout, bit channel, capacity) and image I/O
//! - [`common`]: shared configuration
//! - [`cli`]: the `hide`, `extract` and `capacity` commands
//! - [`server`]: the HTTP API
//! - [`utils`]: logging setup

pub mod cli;
pub mod common;
pub mod processing;
pub mod server;
pub mod utils;

pub use common::config::CodecConfig;
pub use processing::{capacity, decode, encode, encode_in_place, StegoError};
