//! Generator configuration.

use serde::{Deserialize, Serialize};

/// OpenAI-compatible generator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// API key for the chat-completions endpoint.
    pub api_key: String,
    /// Model name (e.g. "gpt-4o-mini").
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_timeout() -> u64 {
    60
}
