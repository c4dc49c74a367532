//! Core `SQLite` store implementation.
//!
//! This module provides the main [`SqlStore`] struct, pool setup and migrations.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::error::StoreError;

/// `SQLite` store backend.
///
/// Records live in a single `students` table whose integer primary key is the
/// record id.
#[derive(Debug, Clone)]
pub struct SqlStore {
    pub(crate) pool: SqlitePool,
}

/// Whether a failed statement was reading or writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

impl SqlStore {
    /// Create a new `SQLite` store.
    ///
    /// # Arguments
    ///
    /// * `database_path` - Path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the connection fails, or
    /// [`StoreError::MigrationFailed`] if the schema cannot be created.
    pub async fn new(database_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = database_path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Unavailable {
                message: format!("Failed to create database directory: {e}"),
            })?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
                .map_err(|e| StoreError::Unavailable {
                    message: format!("Invalid database path: {e}"),
                })?
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable {
                message: format!("Failed to connect to database: {e}"),
            })?;

        tracing::info!(path = %path.display(), "Opened student database");

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Create a new in-memory `SQLite` store for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the connection fails.
    pub async fn new_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StoreError::Unavailable {
                message: format!("Invalid memory database options: {e}"),
            }
        })?;

        // A single connection that never recycles, or the database vanishes.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable {
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Get a clone of the connection pool.
    #[must_use]
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Run database migrations. Each one is idempotent.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        let schema_001 = include_str!("../../../migrations/001_create_students.sql");
        sqlx::query(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        Ok(())
    }

    /// Map a driver error onto the store taxonomy.
    ///
    /// Pool and I/O failures mean the database could not be reached; anything
    /// else happened after the connection succeeded.
    pub(crate) fn map_error(operation: &str, access: Access, error: &sqlx::Error) -> StoreError {
        match error {
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => {
                tracing::error!(operation, error = %error, "Student database unreachable");
                StoreError::Unavailable {
                    message: error.to_string(),
                }
            }
            _ => {
                tracing::warn!(operation, error = %error, "Student database statement failed");
                let operation = operation.to_string();
                let message = error.to_string();
                match access {
                    Access::Read => StoreError::ReadFailure { operation, message },
                    Access::Write => StoreError::WriteFailure { operation, message },
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    pub async fn test_store() -> SqlStore {
        SqlStore::new_in_memory()
            .await
            .expect("Failed to create test store")
    }

    #[tokio::test]
    #[serial]
    async fn test_new_in_memory() {
        let store = SqlStore::new_in_memory().await;
        assert!(store.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_new_with_nested_path() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("school").join("roster").join("students.db");

        let store = SqlStore::new(&db_path).await;
        assert!(store.is_ok());
        assert!(db_path.exists());
    }

    #[tokio::test]
    #[serial]
    async fn test_migrations_are_idempotent() {
        let store = test_store().await;
        assert!(store.run_migrations().await.is_ok());
        assert!(store.run_migrations().await.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_closed_pool_is_unavailable() {
        let store = test_store().await;
        store.pool.close().await;

        let err = sqlx::query("SELECT 1").execute(&store.pool).await.unwrap_err();
        let mapped = SqlStore::map_error("SELECT 1", Access::Read, &err);
        assert!(matches!(mapped, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    #[serial]
    async fn test_statement_error_maps_by_access() {
        let store = test_store().await;
        let err = sqlx::query("SELECT * FROM missing_table")
            .execute(&store.pool)
            .await
            .unwrap_err();

        assert!(matches!(
            SqlStore::map_error("SELECT missing", Access::Read, &err),
            StoreError::ReadFailure { .. }
        ));
        assert!(matches!(
            SqlStore::map_error("INSERT missing", Access::Write, &err),
            StoreError::WriteFailure { ref operation, .. } if operation == "INSERT missing"
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_pool_query() {
        let store = test_store().await;
        let result = sqlx::query("SELECT 1 as value")
            .fetch_one(&store.pool())
            .await;
        assert!(result.is_ok());
    }
}
