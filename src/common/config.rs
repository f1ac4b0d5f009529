//! # Configuration Utilities
//!
//! Shared configuration structures and parsing utilities used by the codec,
//! the command line tool and the web server.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default width of the big-endian message length field, in bytes.
pub const DEFAULT_LENGTH_FIELD_BYTES: usize = 4;

/// Default cap on the encoded extension, in bytes (the length prefix is one byte).
pub const DEFAULT_MAX_EXTENSION_BYTES: usize = 255;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: WebConfig = load_config("config/web.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Immutable codec settings shared by the frame builder, the frame parser
/// and the capacity calculator.
///
/// Built once at startup and passed by value into every codec call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCodecConfig", into = "RawCodecConfig")]
pub struct CodecConfig {
    length_field_bytes: usize,
    max_extension_bytes: usize,
}

impl CodecConfig {
    /// Create a validated codec configuration.
    ///
    /// `length_field_bytes` must be within `1..=8` and `max_extension_bytes`
    /// must fit the one-byte extension length prefix.
    pub fn new(length_field_bytes: usize, max_extension_bytes: usize) -> Result<Self> {
        if !(1..=8).contains(&length_field_bytes) {
            bail!(
                "length_field_bytes must be between 1 and 8, got {}",
                length_field_bytes
            );
        }
        if max_extension_bytes > u8::MAX as usize {
            bail!(
                "max_extension_bytes must be at most {}, got {}",
                u8::MAX,
                max_extension_bytes
            );
        }
        Ok(Self {
            length_field_bytes,
            max_extension_bytes,
        })
    }

    /// Width of the message length field in bytes.
    pub fn length_field_bytes(&self) -> usize {
        self.length_field_bytes
    }

    /// Width of the message length field in bits.
    pub fn length_field_bits(&self) -> usize {
        self.length_field_bytes * 8
    }

    /// Largest extension (in UTF-8 bytes) kept after normalization.
    pub fn max_extension_bytes(&self) -> usize {
        self.max_extension_bytes
    }

    /// Largest message length the length field can represent.
    pub fn max_message_len(&self) -> u64 {
        if self.length_field_bytes >= 8 {
            u64::MAX
        } else {
            (1u64 << self.length_field_bits()) - 1
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            length_field_bytes: DEFAULT_LENGTH_FIELD_BYTES,
            max_extension_bytes: DEFAULT_MAX_EXTENSION_BYTES,
        }
    }
}

/// On-disk shape of [`CodecConfig`], validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawCodecConfig {
    length_field_bytes: usize,
    max_extension_bytes: usize,
}

impl Default for RawCodecConfig {
    fn default() -> Self {
        Self {
            length_field_bytes: DEFAULT_LENGTH_FIELD_BYTES,
            max_extension_bytes: DEFAULT_MAX_EXTENSION_BYTES,
        }
    }
}

impl TryFrom<RawCodecConfig> for CodecConfig {
    type Error = anyhow::Error;

    fn try_from(raw: RawCodecConfig) -> Result<Self> {
        CodecConfig::new(raw.length_field_bytes, raw.max_extension_bytes)
    }
}

impl From<CodecConfig> for RawCodecConfig {
    fn from(config: CodecConfig) -> Self {
        Self {
            length_field_bytes: config.length_field_bytes,
            max_extension_bytes: config.max_extension_bytes,
        }
    }
}

/// Top-level TOML document for tools that only need the `[codec]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodecSection {
    #[serde(default)]
    pub codec: CodecConfig,
}
