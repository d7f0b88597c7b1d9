use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Dispatcher pool size is at least 1
/// - Configured collaborators have non-empty credentials and URLs
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.dispatcher.pool_size == 0 {
        return Err(ConfigError::ValidationError(
            "dispatcher.pool_size must be at least 1".to_string(),
        ));
    }

    if let Some(ref generator) = config.generator {
        if generator.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "generator.api_key cannot be empty".to_string(),
            ));
        }
    }

    if let Some(ref sourcing) = config.sourcing {
        if sourcing.search_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "sourcing.search_url cannot be empty".to_string(),
            ));
        }
    }

    if let Some(ref publisher) = config.publisher {
        if publisher.business_id.trim().is_empty() || publisher.access_token.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "publisher.business_id and publisher.access_token cannot be empty".to_string(),
            ));
        }
        if publisher.public_base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "publisher.public_base_url cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
