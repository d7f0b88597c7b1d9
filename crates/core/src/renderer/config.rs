//! Renderer configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the external render command.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RendererConfig {
    /// Path of the render command binary.
    pub command: PathBuf,
    /// Extra arguments appended before the output path.
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Directory rendered images are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Per-slide timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/generated")
}

fn default_timeout() -> u64 {
    60
}
