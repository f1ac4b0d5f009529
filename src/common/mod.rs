//! # Common Module
//!
//! Shared configuration used by the codec, the CLI and the web server.

pub mod config;

pub use config::{load_config, CodecConfig, CodecSection};
