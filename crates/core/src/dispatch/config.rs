//! Dispatcher configuration.

use serde::{Deserialize, Serialize};

/// Dispatcher tunables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatcherConfig {
    /// Maximum pipelines running concurrently. Claimed topics beyond the
    /// pool size wait for a permit; the pool never rejects them.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            pool_size: default_pool_size(),
        }
    }
}

fn default_pool_size() -> usize {
    2
}
