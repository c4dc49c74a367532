//! Store bindings.
//!
//! Two interchangeable implementations of
//! [`StudentStore`](crate::traits::StudentStore):
//! - [`SqlStore`]: `SQLite` table with auto-incrementing integer ids
//! - [`DocumentStore`]: Remote document collection with generated string keys
//!
//! [`open_store`] picks one from the configured [`StoreBackend`].

mod document;
mod sql;

use std::sync::Arc;

pub use document::{
    DocumentStore, DocumentStoreConfig, COLLECTION, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_MS,
};
pub use sql::SqlStore;

use crate::config::{Config, StoreBackend};
use crate::error::StoreError;
use crate::traits::StudentStore;

/// Open the store selected by `config.backend`.
///
/// # Errors
///
/// Returns [`StoreError::Unavailable`] if the database cannot be opened or
/// the document backend has no project configured, and
/// [`StoreError::MigrationFailed`] if the schema cannot be applied.
pub async fn open_store(config: &Config) -> Result<Arc<dyn StudentStore>, StoreError> {
    match config.backend {
        StoreBackend::Sql => {
            let store = SqlStore::new(&config.database_path).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Document => {
            let settings =
                DocumentStoreConfig::from_app_config(config).ok_or_else(|| StoreError::Unavailable {
                    message: "DOCUMENT_PROJECT_ID is not set".to_string(),
                })?;
            tracing::info!(
                project = %settings.project_id,
                database = %settings.database,
                "Opened document store"
            );
            Ok(Arc::new(DocumentStore::new(settings)?))
        }
    }
}
