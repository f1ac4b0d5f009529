use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::config::{load_config, CodecConfig};

/// Default upload ceiling for a whole multipart request.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default)]
    pub server: ServerInfo,
    #[serde(default)]
    pub codec: CodecConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInfo {
    /// Listen address, e.g. "127.0.0.1:5000"
    pub address: String,
    /// Maximum accepted request body, in bytes
    pub max_upload_bytes: usize,
    /// Directory holding the browser front end
    pub static_dir: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:5000".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            static_dir: "frontend".to_string(),
        }
    }
}

impl WebConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_config(path)
    }
}
