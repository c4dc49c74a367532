//! Document-store binding over the REST document API.
//!
//! This module provides:
//! - Collection listing with page-token pagination
//! - Create with a store-generated string key
//! - Full-replace update and delete guarded by an existence precondition
//! - Mapping of HTTP failures onto [`StoreError`]
//!
//! Requests are sent once. There is no retry loop; a timeout is the only
//! hardening applied.

#![allow(clippy::missing_errors_doc)]

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use uuid::Uuid;

use super::config::DocumentStoreConfig;
use super::fields::{Document, ListPage};
use crate::error::StoreError;
use crate::student::{NewStudent, StudentId, StudentRecord};
use crate::traits::StudentStore;

/// Field paths replaced by an update; anything else on the document is kept.
const UPDATE_MASK: [&str; 4] = ["name", "section", "grade", "status"];

/// Store backed by a remote document collection named `students`.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    client: Client,
    config: DocumentStoreConfig,
}

impl DocumentStore {
    /// Create a new document store client.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the HTTP client cannot be built.
    pub fn new(config: DocumentStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| StoreError::Unavailable {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &DocumentStoreConfig {
        &self.config
    }

    fn document_url(&self, id: &StudentId) -> Result<String, StoreError> {
        let key = id.to_string();
        // A slash would address a different resource entirely.
        if key.is_empty() || key.contains('/') {
            return Err(StoreError::not_found(id));
        }
        Ok(format!("{}/{key}", self.config.collection_url()))
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.query(&[("key", key.expose())]),
            None => request,
        }
    }

    /// Send a request once, mapping transport failures to `Unavailable`.
    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response, StoreError> {
        let start = Instant::now();
        let response = self.with_key(request).send().await.map_err(|e| {
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            tracing::error!(
                operation,
                elapsed_ms,
                timeout = e.is_timeout(),
                error = %e,
                "Document store request failed"
            );
            StoreError::Unavailable {
                message: if e.is_timeout() {
                    format!("{operation} timed out after {}ms", self.config.timeout_ms)
                } else {
                    e.to_string()
                },
            }
        })?;

        tracing::debug!(
            operation,
            status = %response.status(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Document store response received"
        );
        Ok(response)
    }

    /// Turn a non-success response into a store error.
    async fn failure(
        operation: &str,
        response: Response,
        id: Option<&StudentId>,
        write: bool,
    ) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let missing = status == StatusCode::NOT_FOUND
            || (status == StatusCode::BAD_REQUEST && body.contains("FAILED_PRECONDITION"));

        let error = match id {
            Some(id) if missing => StoreError::not_found(id),
            _ if status == StatusCode::UNAUTHORIZED
                || status == StatusCode::FORBIDDEN
                || (id.is_none() && status == StatusCode::NOT_FOUND) =>
            {
                StoreError::Unavailable {
                    message: format!("Status {status}: {body}"),
                }
            }
            _ if write => StoreError::WriteFailure {
                operation: operation.to_string(),
                message: format!("Status {status}: {body}"),
            },
            _ => StoreError::ReadFailure {
                operation: operation.to_string(),
                message: format!("Status {status}: {body}"),
            },
        };

        tracing::warn!(operation, %status, error = %error, "Document store rejected request");
        error
    }

    async fn list_page(&self, page_token: Option<&str>) -> Result<ListPage, StoreError> {
        let mut request = self
            .client
            .get(self.config.collection_url())
            .query(&[("pageSize", self.config.page_size.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = self.send("list students", request).await?;
        if !response.status().is_success() {
            return Err(Self::failure("list students", response, None, false).await);
        }

        response
            .json::<ListPage>()
            .await
            .map_err(|e| StoreError::ReadFailure {
                operation: "list students".to_string(),
                message: format!("Failed to parse response: {e}"),
            })
    }
}

#[async_trait]
impl StudentStore for DocumentStore {
    async fn list_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_page(page_token.as_deref()).await?;
            for document in page.documents {
                let field_count = document.fields.len();
                match document.into_record() {
                    Some(record) => records.push(record),
                    None => tracing::warn!(
                        field_count,
                        "Skipping student document without a resource name"
                    ),
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(count = records.len(), "Listed student documents");
        Ok(records)
    }

    async fn create(&self, student: &NewStudent) -> Result<StudentId, StoreError> {
        let key = Uuid::new_v4().simple().to_string();
        let request = self
            .client
            .post(self.config.collection_url())
            .query(&[("documentId", key.as_str())])
            .json(&Document::from_student(student));

        let response = self.send("create student", request).await?;
        if !response.status().is_success() {
            return Err(Self::failure("create student", response, None, true).await);
        }

        tracing::debug!(key = %key, "Created student document");
        Ok(StudentId::Key(key))
    }

    async fn update(&self, id: &StudentId, student: &NewStudent) -> Result<(), StoreError> {
        let mut request = self
            .client
            .patch(self.document_url(id)?)
            .query(&[("currentDocument.exists", "true")]);
        for field in UPDATE_MASK {
            request = request.query(&[("updateMask.fieldPaths", field)]);
        }
        let request = request.json(&Document::from_student(student));

        let response = self.send("update student", request).await?;
        if !response.status().is_success() {
            return Err(Self::failure("update student", response, Some(id), true).await);
        }

        tracing::debug!(%id, "Updated student document");
        Ok(())
    }

    async fn delete(&self, id: &StudentId) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.document_url(id)?)
            .query(&[("currentDocument.exists", "true")]);

        let response = self.send("delete student", request).await?;
        if !response.status().is_success() {
            return Err(Self::failure("delete student", response, Some(id), true).await);
        }

        tracing::debug!(%id, "Deleted student document");
        Ok(())
    }
}
