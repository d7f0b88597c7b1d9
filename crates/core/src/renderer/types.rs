//! Rendered artifact type.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A rendered slide image on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Path of the rendered image.
    pub path: PathBuf,
    /// Zero-based index of the slide this artifact was rendered from.
    pub slide_index: usize,
}
