//! Error types for the student record service.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`StoreError`]: Failures raised by a [`StudentStore`](crate::traits::StudentStore) binding
//! - [`ValidationError`]: Boundary validation failures, raised before a store is reached
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// This is the main error type returned by startup and serving functions.
/// It wraps all subsystem errors for unified error handling.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server I/O error (bind, accept, shutdown).
    #[error("Server error: {message}")]
    Server {
        /// Description of the server failure.
        message: String,
    },
}

/// Store errors.
///
/// Every binding maps its transport and persistence failures onto these
/// variants so callers never see a raw driver or HTTP error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The connection or transport could not be established.
    #[error("Store unavailable: {message}")]
    Unavailable {
        /// Description of the connection failure.
        message: String,
    },

    /// Update or delete addressed an id with no record.
    #[error("Student not found: {id}")]
    NotFound {
        /// The id that was not found.
        id: String,
    },

    /// A read failed after the connection succeeded.
    #[error("Read failed: {operation} - {message}")]
    ReadFailure {
        /// The operation that failed.
        operation: String,
        /// Description of the failure.
        message: String,
    },

    /// A write failed after the connection succeeded.
    #[error("Write failed: {operation} - {message}")]
    WriteFailure {
        /// The operation that failed.
        operation: String,
        /// Description of the failure.
        message: String,
    },

    /// Schema migration failed.
    #[error("Migration failed: {version} - {message}")]
    MigrationFailed {
        /// The migration version that failed.
        version: String,
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Short machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "store_unavailable",
            Self::NotFound { .. } => "not_found",
            Self::ReadFailure { .. } => "read_failure",
            Self::WriteFailure { .. } | Self::MigrationFailed { .. } => "write_failure",
        }
    }

    /// Convenience constructor for [`StoreError::NotFound`].
    #[must_use]
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

/// Validation errors.
///
/// Raised at the boundary when a create or update payload is incomplete or
/// malformed. An operation that fails validation never reaches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Invalid value for a field.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },
}

impl ValidationError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } | Self::InvalidValue { field, .. } => field,
        }
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
