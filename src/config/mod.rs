//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (with `.env` support)
//! - Store binding selection
//! - Configuration validation
//! - Secure credential storage via [`SecretString`]
//!
//! # Example
//!
//! ```
//! use student_records::config::{Config, StoreBackend};
//!
//! // Use Config::from_env() in production
//! let config = Config::default();
//! assert_eq!(config.backend, StoreBackend::Sql);
//! assert_eq!(config.listen_address(), "0.0.0.0:3001");
//! ```

mod secret;
mod validation;

pub use secret::SecretString;
pub use validation::{validate_config, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS};

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::student::Status;
use crate::view::Theme;

/// Default database path for the SQL binding.
pub const DEFAULT_DATABASE_PATH: &str = "./data/students.db";

/// Default document-store REST endpoint.
pub const DEFAULT_DOCUMENT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Default document-store database name.
pub const DEFAULT_DOCUMENT_DATABASE: &str = "(default)";

/// Default bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default per-request timeout for the document binding, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Which persistence binding backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Relational table via `SQLite`.
    #[default]
    Sql,
    /// Remote document collection.
    Document,
}

impl StoreBackend {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sql" | "sqlite" | "relational" => Ok(Self::Sql),
            "document" | "firestore" => Ok(Self::Document),
            other => Err(ConfigError::InvalidValue {
                var: "STORE_BACKEND".into(),
                reason: format!("expected 'sql' or 'document', got '{other}'"),
            }),
        }
    }
}

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
/// The document API key uses [`SecretString`] to prevent accidental logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Selected persistence binding.
    pub backend: StoreBackend,
    /// `SQLite` database path (SQL binding).
    pub database_path: String,
    /// Document-store project id (document binding).
    pub document_project_id: Option<String>,
    /// Document-store API key (document binding).
    pub document_api_key: Option<SecretString>,
    /// Document-store REST base URL.
    pub document_base_url: String,
    /// Document-store database name.
    pub document_database: String,
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// HTTP port.
    pub port: u16,
    /// Log filter directive (error, warn, info, debug, trace).
    pub log_level: String,
    /// Document binding request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Status applied to drafts submitted without one.
    pub default_status: Status,
    /// Display theme handed to views.
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sql,
            database_path: DEFAULT_DATABASE_PATH.into(),
            document_project_id: None,
            document_api_key: None,
            document_base_url: DEFAULT_DOCUMENT_BASE_URL.into(),
            document_database: DEFAULT_DOCUMENT_DATABASE.into(),
            bind_address: DEFAULT_BIND_ADDRESS.into(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.into(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            default_status: Status::Passed,
            theme: Theme::Light,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `STORE_BACKEND`: `sql` or `document` (default: `sql`)
    /// - `DATABASE_PATH`: `SQLite` path (default: `./data/students.db`)
    /// - `DOCUMENT_PROJECT_ID`: required when `STORE_BACKEND=document`
    /// - `DOCUMENT_API_KEY`: document-store API key (default: none)
    /// - `DOCUMENT_BASE_URL`: (default: `https://firestore.googleapis.com/v1`)
    /// - `DOCUMENT_DATABASE`: (default: `(default)`)
    /// - `BIND_ADDRESS`: (default: `0.0.0.0`)
    /// - `PORT`: (default: `3001`)
    /// - `LOG_LEVEL`: (default: `info`)
    /// - `REQUEST_TIMEOUT_MS`: (default: `10000`)
    /// - `DEFAULT_STATUS`: `Passed`, `Conditional` or `At Risk` (default: `Passed`)
    /// - `THEME`: `light` or `dark` (default: `light`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `DOCUMENT_PROJECT_ID` is missing while the document binding is selected
    /// - a numeric or enumerated variable cannot be parsed
    /// - any value fails validation (see [`validate_config`])
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let backend = env_var("STORE_BACKEND")
            .map_or(Ok(StoreBackend::default()), |v| v.parse())?;

        let document_project_id = env_var("DOCUMENT_PROJECT_ID");
        if backend == StoreBackend::Document && document_project_id.is_none() {
            return Err(ConfigError::MissingRequired {
                var: "DOCUMENT_PROJECT_ID".into(),
            });
        }

        let default_status = match env_var("DEFAULT_STATUS") {
            None => Status::Passed,
            Some(raw) => Status::from_str(raw.trim()).ok_or_else(|| ConfigError::InvalidValue {
                var: "DEFAULT_STATUS".into(),
                reason: "must be Passed, Conditional or At Risk".into(),
            })?,
        };

        let theme = env_var("THEME").map_or(Ok(Theme::Light), |raw| {
            raw.parse().map_err(|()| ConfigError::InvalidValue {
                var: "THEME".into(),
                reason: "must be light or dark".into(),
            })
        })?;

        let config = Self {
            backend,
            database_path: env_var("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.into()),
            document_project_id,
            document_api_key: env_var("DOCUMENT_API_KEY").map(SecretString::new),
            document_base_url: env_var("DOCUMENT_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DOCUMENT_BASE_URL.into()),
            document_database: env_var("DOCUMENT_DATABASE")
                .unwrap_or_else(|| DEFAULT_DOCUMENT_DATABASE.into()),
            bind_address: env_var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into()),
            port: parse_env("PORT", DEFAULT_PORT, "must be a port number")?,
            log_level: env_var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            request_timeout_ms: parse_env(
                "REQUEST_TIMEOUT_MS",
                DEFAULT_REQUEST_TIMEOUT_MS,
                "must be a positive integer",
            )?,
            default_status,
            theme,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// `address:port` string for the HTTP listener.
    #[must_use]
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Read a variable, treating unset and empty the same.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, using a default if not set.
fn parse_env<T: FromStr>(name: &str, default: T, reason: &str) -> Result<T, ConfigError> {
    env_var(name).map_or(Ok(default), |val| {
        val.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: reason.into(),
        })
    })
}
