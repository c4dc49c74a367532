//! Document-store client configuration.

#![allow(clippy::missing_const_for_fn)]

use crate::config::{Config, SecretString, DEFAULT_DOCUMENT_BASE_URL, DEFAULT_DOCUMENT_DATABASE};

/// Name of the collection holding student documents.
pub const COLLECTION: &str = "students";
/// Default timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default page size when listing the collection.
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Connection settings for [`DocumentStore`](super::DocumentStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStoreConfig {
    /// REST base URL, without trailing slash.
    pub base_url: String,
    /// Project owning the database.
    pub project_id: String,
    /// Database name within the project.
    pub database: String,
    /// Optional API key, sent as the `key` query parameter.
    pub api_key: Option<SecretString>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Documents requested per list page.
    pub page_size: u32,
}

impl DocumentStoreConfig {
    /// Create a configuration for `project_id` with defaults.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_DOCUMENT_BASE_URL.to_string(),
            project_id: project_id.into(),
            database: DEFAULT_DOCUMENT_DATABASE.to_string(),
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Build from the application configuration.
    ///
    /// Returns `None` when no project id is configured.
    #[must_use]
    pub fn from_app_config(config: &Config) -> Option<Self> {
        let project_id = config.document_project_id.clone()?;
        Some(Self {
            base_url: config.document_base_url.clone(),
            project_id,
            database: config.document_database.clone(),
            api_key: config.document_api_key.clone(),
            timeout_ms: config.request_timeout_ms,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Set base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set database name.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set list page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// URL of the `students` collection.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{COLLECTION}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database
        )
    }
}
