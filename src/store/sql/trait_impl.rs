//! `StudentStore` implementation for `SqlStore`.

use async_trait::async_trait;

use super::core::SqlStore;
use crate::error::StoreError;
use crate::student::{NewStudent, StudentId, StudentRecord};
use crate::traits::StudentStore;

/// Resolve an id to a row id. String keys can never name a row.
fn row_id(id: &StudentId) -> Result<i64, StoreError> {
    id.as_number().ok_or_else(|| StoreError::not_found(id))
}

#[async_trait]
impl StudentStore for SqlStore {
    async fn list_all(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let records = self.select_students().await?;
        tracing::debug!(count = records.len(), "Listed students");
        Ok(records)
    }

    async fn create(&self, student: &NewStudent) -> Result<StudentId, StoreError> {
        let id = self.insert_student(student).await?;
        tracing::debug!(id, "Created student");
        Ok(StudentId::Number(id))
    }

    async fn update(&self, id: &StudentId, student: &NewStudent) -> Result<(), StoreError> {
        self.update_student(row_id(id)?, student).await?;
        tracing::debug!(%id, "Updated student");
        Ok(())
    }

    async fn delete(&self, id: &StudentId) -> Result<(), StoreError> {
        self.delete_student(row_id(id)?).await?;
        tracing::debug!(%id, "Deleted student");
        Ok(())
    }
}
