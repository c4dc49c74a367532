//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock [`StudentStore`](crate::traits::StudentStore) factories
//! - Record fixtures
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::error::StoreError;
use crate::student::{NewStudent, Status, StudentRecord};
use crate::traits::MockStudentStore;

/// Create a record with a numeric id.
#[must_use]
pub fn test_record(id: i64, name: &str, section: &str, grade: f64, status: Status) -> StudentRecord {
    StudentRecord::new(id, NewStudent::new(name, section, grade, status))
}

/// Three records across two sections and all three statuses.
#[must_use]
pub fn sample_roster() -> Vec<StudentRecord> {
    vec![
        test_record(1, "Anna", "Rizal", 95.0, Status::Passed),
        test_record(2, "Bob", "Mabini", 70.0, Status::AtRisk),
        test_record(3, "Juan", "Rizal", 86.0, Status::Conditional),
    ]
}

/// Create a mock store whose `list_all` always returns `records`.
///
/// # Example
///
/// ```ignore
/// let store = mock_store_listing(sample_roster());
/// assert_eq!(store.list_all().await.unwrap().len(), 3);
/// ```
#[must_use]
pub fn mock_store_listing(records: Vec<StudentRecord>) -> MockStudentStore {
    let mut mock = MockStudentStore::new();
    mock.expect_list_all().returning(move || Ok(records.clone()));
    mock
}

/// Create a mock store whose every operation fails with `error`.
#[must_use]
pub fn mock_store_error(error: StoreError) -> MockStudentStore {
    let mut mock = MockStudentStore::new();
    let list_err = error.clone();
    mock.expect_list_all().returning(move || Err(list_err.clone()));
    let create_err = error.clone();
    mock.expect_create().returning(move |_| Err(create_err.clone()));
    let update_err = error.clone();
    mock.expect_update().returning(move |_, _| Err(update_err.clone()));
    mock.expect_delete().returning(move |_| Err(error.clone()));
    mock
}

/// `StoreError::Unavailable` with a fixed message.
#[must_use]
pub fn unavailable() -> StoreError {
    StoreError::Unavailable {
        message: "connection refused".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::StudentId;
    use crate::traits::StudentStore;

    #[tokio::test]
    async fn test_mock_store_listing() {
        let store = mock_store_listing(sample_roster());
        assert_eq!(store.list_all().await.unwrap(), sample_roster());
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_store_error() {
        let store = mock_store_error(unavailable());
        let id = StudentId::Number(1);
        let student = NewStudent::new("A", "B", 1.0, Status::Passed);

        assert_eq!(store.list_all().await, Err(unavailable()));
        assert_eq!(store.create(&student).await, Err(unavailable()));
        assert_eq!(store.update(&id, &student).await, Err(unavailable()));
        assert_eq!(store.delete(&id).await, Err(unavailable()));
    }
}
