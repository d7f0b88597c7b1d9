use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::dispatch::DispatcherConfig;
use crate::generator::GeneratorConfig;
use crate::pipeline::PipelineConfig;
use crate::publisher::PublisherConfig;
use crate::renderer::RendererConfig;
use crate::sourcing::SourcingConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Collaborators are optional: absent sections leave the service
    /// running with the queue API only.
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
    #[serde(default)]
    pub renderer: Option<RendererConfig>,
    #[serde(default)]
    pub sourcing: Option<SourcingConfig>,
    #[serde(default)]
    pub publisher: Option<PublisherConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("postino.db")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub dispatcher: DispatcherConfig,
    pub pipeline: PipelineConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<SanitizedGeneratorConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<RendererConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcing: Option<SanitizedSourcingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<SanitizedPublisherConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedGeneratorConfig {
    pub model: String,
    pub api_base: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourcingConfig {
    pub search_url: String,
    pub api_key: Option<String>,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPublisherConfig {
    pub business_id: String,
    pub access_token: String,
    pub api_version: String,
    pub public_base_url: String,
}

const REDACTED: &str = "***";

impl Config {
    /// Produce a copy safe to expose over the API.
    pub fn sanitized(&self) -> SanitizedConfig {
        SanitizedConfig {
            server: self.server.clone(),
            database: self.database.clone(),
            dispatcher: self.dispatcher.clone(),
            pipeline: self.pipeline.clone(),
            generator: self.generator.as_ref().map(|g| SanitizedGeneratorConfig {
                model: g.model.clone(),
                api_base: g.api_base.clone(),
                api_key: REDACTED.to_string(),
            }),
            renderer: self.renderer.clone(),
            sourcing: self.sourcing.as_ref().map(|s| SanitizedSourcingConfig {
                search_url: s.search_url.clone(),
                api_key: s.api_key.as_ref().map(|_| REDACTED.to_string()),
                output_dir: s.output_dir.clone(),
            }),
            publisher: self.publisher.as_ref().map(|p| SanitizedPublisherConfig {
                business_id: p.business_id.clone(),
                access_token: REDACTED.to_string(),
                api_version: p.api_version.clone(),
                public_base_url: p.public_base_url.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, PathBuf::from("postino.db"));
        assert_eq!(config.dispatcher.pool_size, 2);
        assert_eq!(config.pipeline.sourced_images, 3);
        assert!(config.generator.is_none());
        assert!(config.publisher.is_none());
    }

    #[test]
    fn test_sanitized_redacts_secrets() {
        let config: Config = toml::from_str(
            r#"
[generator]
api_key = "sk-secret"

[publisher]
business_id = "12345"
access_token = "tok-secret"
public_base_url = "https://cdn.example/posts"
"#,
        )
        .unwrap();

        let sanitized = config.sanitized();
        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!json.contains("tok-secret"));
        assert!(json.contains("12345"));
    }
}
