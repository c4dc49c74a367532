//! Integration tests for the Student Record Service.
//!
//! These tests verify end-to-end workflows including:
//! - Store lifecycle on an on-disk database
//! - Roster view refresh, save and delete against a real store
//! - Concurrent updates to one record
//! - Configuration handling

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serial_test::serial;
use student_records::config::{Config, StoreBackend};
use student_records::error::{AppError, ConfigError, StoreError};
use student_records::report::{filter, search, summarize, GradeRange, ReportFilter};
use student_records::store::{open_store, SqlStore};
use student_records::student::{NewStudent, Status, StudentDraft, StudentId, StudentRecord};
use student_records::traits::StudentStore;
use student_records::view::{Notice, RosterView, ViewSettings, ADDED, DELETED};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a store in a temporary directory.
async fn create_test_store() -> (SqlStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("students.db");
    let store = SqlStore::new(&db_path).await.expect("Failed to create store");
    (store, temp_dir)
}

fn student(name: &str, section: &str, grade: f64, status: Status) -> NewStudent {
    NewStudent::new(name, section, grade, status)
}

// ============================================================================
// Store Workflow Tests
// ============================================================================

#[tokio::test]
#[serial]
async fn test_list_reflects_net_effect_of_operations() {
    let (store, _dir) = create_test_store().await;

    let anna = store.create(&student("Anna", "A", 90.0, Status::Passed)).await.unwrap();
    let bob = store.create(&student("Bob", "B", 70.0, Status::AtRisk)).await.unwrap();
    let juan = store.create(&student("Juan", "A", 85.0, Status::Conditional)).await.unwrap();

    store.delete(&bob).await.unwrap();
    store
        .update(&juan, &student("Juan", "C", 88.0, Status::Passed))
        .await
        .unwrap();

    let records = store.list_all().await.unwrap();
    assert_eq!(
        records,
        vec![
            StudentRecord::new(anna, student("Anna", "A", 90.0, Status::Passed)),
            StudentRecord::new(juan, student("Juan", "C", 88.0, Status::Passed)),
        ]
    );
}

#[tokio::test]
#[serial]
async fn test_records_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("students.db");

    let id = {
        let store = SqlStore::new(&db_path).await.unwrap();
        store.create(&student("Anna", "A", 90.0, Status::Passed)).await.unwrap()
    };

    let store = SqlStore::new(&db_path).await.unwrap();
    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
}

#[tokio::test]
#[serial]
async fn test_ids_are_never_reused() {
    let (store, _dir) = create_test_store().await;
    let mut seen = Vec::new();

    for round in 0..5 {
        let id = store
            .create(&student(&format!("S{round}"), "A", 80.0, Status::Passed))
            .await
            .unwrap();
        assert!(!seen.contains(&id), "id {id} handed out twice");
        seen.push(id.clone());
        if round % 2 == 0 {
            store.delete(&id).await.unwrap();
        }
    }
}

#[tokio::test]
#[serial]
async fn test_second_delete_is_not_found() {
    let (store, _dir) = create_test_store().await;
    let id = store.create(&student("Anna", "A", 90.0, Status::Passed)).await.unwrap();

    store.delete(&id).await.unwrap();
    let err = store.delete(&id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
#[serial]
async fn test_concurrent_updates_are_last_write_wins() {
    let (store, _dir) = create_test_store().await;
    let store = Arc::new(store);
    let id = store.create(&student("Anna", "A", 90.0, Status::Passed)).await.unwrap();

    let first = student("Anna One", "X", 61.0, Status::AtRisk);
    let second = student("Anna Two", "Y", 99.0, Status::Conditional);

    let a = tokio::spawn({
        let (store, id, s) = (Arc::clone(&store), id.clone(), first.clone());
        async move { store.update(&id, &s).await }
    });
    let b = tokio::spawn({
        let (store, id, s) = (Arc::clone(&store), id.clone(), second.clone());
        async move { store.update(&id, &s).await }
    });
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    let stored = records[0].clone();
    assert!(
        stored == StudentRecord::new(id.clone(), first) || stored == StudentRecord::new(id, second),
        "unexpected mix: {stored:?}"
    );
}

// ============================================================================
// Report Tests
// ============================================================================

#[tokio::test]
#[serial]
async fn test_reports_over_stored_records() {
    let (store, _dir) = create_test_store().await;
    for (name, grade, status) in [
        ("Anna", 95.0, Status::Passed),
        ("Juan", 89.0, Status::Conditional),
        ("Bob", 90.0, Status::Passed),
        ("Lea", 60.0, Status::AtRisk),
    ] {
        store.create(&student(name, "A", grade, status)).await.unwrap();
    }
    let records = store.list_all().await.unwrap();

    let top: Vec<_> = filter(&records, &ReportFilter::all().with_grade(GradeRange::Top))
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(top, vec!["Anna", "Bob"]);

    let found: Vec<_> = search(&records, "an").into_iter().map(|r| r.name.as_str()).collect();
    assert_eq!(found, vec!["Anna", "Juan"]);

    let summary = summarize(&records);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.passed, 2);
    assert!((summary.average_grade - 83.5).abs() < f64::EPSILON);
}

// ============================================================================
// Roster View Tests
// ============================================================================

#[tokio::test]
#[serial]
async fn test_roster_view_against_sql_store() {
    let (store, _dir) = create_test_store().await;
    let view = RosterView::open(Arc::new(store), ViewSettings::default()).await;
    assert!(view.is_loaded());
    assert!(view.records().is_empty());

    let draft = StudentDraft::new()
        .with_name("Anna")
        .with_section("Rizal")
        .with_grade(92);
    let id = view.save(&draft, None).await.unwrap();
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.records()[0].status, Status::Passed);

    let err = view
        .save(&StudentDraft::new().with_name("No grade").with_section("Rizal"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    view.remove(&id).await.unwrap();
    assert!(view.records().is_empty());

    let notices = view.take_notices();
    assert_eq!(notices.first(), Some(&Notice::Success(ADDED.into())));
    assert!(notices[1].is_error());
    assert_eq!(notices.last(), Some(&Notice::Success(DELETED.into())));

    let err = view.remove(&StudentId::Number(999)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[tokio::test]
#[serial]
async fn test_open_store_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        database_path: temp_dir.path().join("db/students.db").display().to_string(),
        ..Config::default()
    };
    assert_eq!(config.backend, StoreBackend::Sql);

    let store = open_store(&config).await.unwrap();
    let id = store.create(&student("Anna", "A", 90.0, Status::Passed)).await.unwrap();
    assert_eq!(id, StudentId::Number(1));
}

#[test]
#[serial]
fn test_document_backend_without_project_fails() {
    std::env::set_var("STORE_BACKEND", "document");
    std::env::remove_var("DOCUMENT_PROJECT_ID");

    let result = Config::from_env();
    std::env::remove_var("STORE_BACKEND");

    assert!(matches!(result, Err(ConfigError::MissingRequired { .. })));
}
