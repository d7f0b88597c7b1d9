//! Publisher configuration.

use serde::{Deserialize, Serialize};

/// Graph API publisher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublisherConfig {
    /// Business account id posts are published under.
    pub business_id: String,
    /// Graph API access token.
    pub access_token: String,
    /// Graph API base URL.
    #[serde(default = "default_graph_base")]
    pub graph_base: String,
    /// Graph API version segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Public base URL local artifacts are reachable under; the platform
    /// fetches images by URL, so local paths are mapped to
    /// `{public_base_url}/{filename}`.
    pub public_base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_graph_base() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_api_version() -> String {
    "v24.0".to_string()
}

fn default_timeout() -> u64 {
    30
}
