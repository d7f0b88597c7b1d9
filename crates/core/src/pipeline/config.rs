//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a pipeline run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Reference images requested per topic.
    #[serde(default = "default_sourced_images")]
    pub sourced_images: usize,
    /// Primary hashtag appended to every caption.
    #[serde(default = "default_hashtag")]
    pub hashtag: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sourced_images: default_sourced_images(),
            hashtag: default_hashtag(),
        }
    }
}

fn default_sourced_images() -> usize {
    3
}

fn default_hashtag() -> String {
    "DSA".to_string()
}
