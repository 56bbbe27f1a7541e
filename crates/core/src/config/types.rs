use serde::{Deserialize, Serialize};

use crate::api::TmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tmdb: TmdbConfig,
}

/// Sanitized config for display/diagnostics (bearer token redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub tmdb: SanitizedTmdbConfig,
}

/// Sanitized TMDB config (bearer token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub bearer_token_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            tmdb: SanitizedTmdbConfig {
                bearer_token_configured: !config.tmdb.bearer_token.is_empty(),
                base_url: config.tmdb.base_url.clone(),
                language: config.tmdb.language.clone(),
                timeout_secs: config.tmdb.timeout_secs,
            },
        }
    }
}
