//! Sourced image type.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A downloaded reference image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcedImage {
    /// Local path of the downloaded image.
    pub path: PathBuf,
    /// URL the image was downloaded from.
    pub source_url: String,
}
