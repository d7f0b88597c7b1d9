//! Image sourcing configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the HTTP image sourcer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcingConfig {
    /// Image search endpoint returning `{"results": [{"url", "width", "height"}]}`.
    pub search_url: String,
    /// Optional API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Directory downloaded images are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Appended to the topic name to bias results towards diagrams.
    #[serde(default = "default_query_suffix")]
    pub query_suffix: String,
    /// Images narrower than this are skipped.
    #[serde(default = "default_min_width")]
    pub min_width: u32,
    /// Images shorter than this are skipped.
    #[serde(default = "default_min_height")]
    pub min_height: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/generated")
}

fn default_query_suffix() -> String {
    "data structure diagram".to_string()
}

fn default_min_width() -> u32 {
    400
}

fn default_min_height() -> u32 {
    200
}

fn default_timeout() -> u64 {
    30
}
