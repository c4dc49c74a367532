//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::{Config, StoreBackend};
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `PORT` must not be 0
/// - `REQUEST_TIMEOUT_MS` must be between 1000 and 300000
/// - `DATABASE_PATH` must not be empty for the SQL binding
/// - `DOCUMENT_PROJECT_ID` and `DOCUMENT_API_KEY` must not be blank when set
/// - `DOCUMENT_BASE_URL` must be an http(s) URL
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(invalid("PORT", "must be between 1 and 65535"));
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS || config.request_timeout_ms > MAX_TIMEOUT_MS {
        return Err(invalid(
            "REQUEST_TIMEOUT_MS",
            &format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        ));
    }

    match config.backend {
        StoreBackend::Sql => {
            if config.database_path.trim().is_empty() {
                return Err(invalid("DATABASE_PATH", "must not be empty"));
            }
        }
        StoreBackend::Document => {
            if config
                .document_project_id
                .as_deref()
                .is_none_or(|p| p.trim().is_empty())
            {
                return Err(ConfigError::MissingRequired {
                    var: "DOCUMENT_PROJECT_ID".into(),
                });
            }
        }
    }

    if config
        .document_api_key
        .as_ref()
        .is_some_and(super::SecretString::is_blank)
    {
        return Err(invalid("DOCUMENT_API_KEY", "must not be empty"));
    }

    if !(config.document_base_url.starts_with("http://")
        || config.document_base_url.starts_with("https://"))
    {
        return Err(invalid("DOCUMENT_BASE_URL", "must start with http:// or https://"));
    }

    Ok(())
}

fn invalid(var: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var: var.into(),
        reason: reason.into(),
    }
}
