use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - TMDB section exists (enforced by serde)
/// - Bearer token is non-empty
/// - Request timeout, when given, is not zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tmdb.bearer_token.is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.bearer_token cannot be empty".to_string(),
        ));
    }

    if config.tmdb.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "tmdb.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
