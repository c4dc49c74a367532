//! Trait definitions for mockable dependencies.
//!
//! This module defines [`StudentStore`], the capability every persistence
//! binding implements. The rest of the crate (report views, the HTTP server)
//! only ever talks to a `dyn StudentStore`, so the relational and document
//! bindings are interchangeable at startup.
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates a mock implementation automatically for testing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::student::{NewStudent, StudentId, StudentRecord};

/// Student record store.
///
/// Implementations own the persisted records and are the only component
/// allowed to mutate them. No operation spans more than one record, so no
/// multi-record transaction is required; concurrent updates to the same id
/// resolve last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// List every persisted record in a deterministic, storage-native order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached, or
    /// [`StoreError::ReadFailure`] if the read fails.
    async fn list_all(&self) -> Result<Vec<StudentRecord>, StoreError>;

    /// Persist a new record and return its freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WriteFailure`] on persistence failure. Create is
    /// all-or-nothing.
    async fn create(&self, student: &NewStudent) -> Result<StudentId, StoreError>;

    /// Replace the four mutable fields of the record at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id, or
    /// [`StoreError::WriteFailure`] on persistence failure.
    async fn update(&self, id: &StudentId, student: &NewStudent) -> Result<(), StoreError>;

    /// Remove the record at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id (including a
    /// second delete of the same id), or [`StoreError::WriteFailure`].
    async fn delete(&self, id: &StudentId) -> Result<(), StoreError>;
}

/// Forwarding implementation so a shared store can be handed around.
#[async_trait]
impl<T: StudentStore + ?Sized> StudentStore for Arc<T> {
    async fn list_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        self.as_ref().list_all().await
    }

    async fn create(&self, student: &NewStudent) -> Result<StudentId, StoreError> {
        self.as_ref().create(student).await
    }

    async fn update(&self, id: &StudentId, student: &NewStudent) -> Result<(), StoreError> {
        self.as_ref().update(id, student).await
    }

    async fn delete(&self, id: &StudentId) -> Result<(), StoreError> {
        self.as_ref().delete(id).await
    }
}
