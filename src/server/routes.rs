//! Route handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::AppState;
use crate::report::{self, ReportFilter, StatusCount, Summary};
use crate::student::{StudentDraft, StudentId, StudentRecord};
use crate::view::{ViewSettings, ADDED, DELETED, UPDATED};

/// Acknowledgement of a mutation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Id assigned by a create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            id: None,
        }
    }
}

/// Query string of `GET /reports/students`. Absent fields mean `"All"`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Status bucket.
    pub status: Option<String>,
    /// Section.
    pub section: Option<String>,
    /// Grade bucket, e.g. `90-100`.
    pub grade: Option<String>,
    /// Case-insensitive name substring.
    pub q: Option<String>,
}

/// Body of `GET /reports/summary`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Totals and average.
    #[serde(flatten)]
    pub summary: Summary,
    /// Per-status chart series.
    pub status_counts: Vec<StatusCount>,
}

fn student_id(raw: &str) -> StudentId {
    match raw.parse::<StudentId>() {
        Ok(id) => id,
        Err(never) => match never {},
    }
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /students`
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentRecord>>, ApiError> {
    Ok(Json(state.store.list_all().await?))
}

/// `POST /students`
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentDraft>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(draft) = payload?;
    let student = draft.validate(&state.config.default_status)?;
    let id = state.store.create(&student).await?;

    tracing::info!(%id, "Student added");
    Ok(Json(MessageResponse {
        message: ADDED.to_string(),
        id: Some(id),
    }))
}

/// `PUT /students/{id}`
pub async fn update_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<StudentDraft>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(draft) = payload?;
    let student = draft.validate(&state.config.default_status)?;
    let id = student_id(&raw_id);
    state.store.update(&id, &student).await?;

    tracing::info!(%id, "Student updated");
    Ok(Json(MessageResponse::new(UPDATED)))
}

/// `DELETE /students/{id}`
pub async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = student_id(&raw_id);
    state.store.delete(&id).await?;

    tracing::info!(%id, "Student deleted");
    Ok(Json(MessageResponse::new(DELETED)))
}

/// `GET /reports/students`
pub async fn report_students(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<Vec<StudentRecord>>, ApiError> {
    let Query(query) = query?;
    let filter = ReportFilter::parse(
        query.status.as_deref(),
        query.section.as_deref(),
        query.grade.as_deref(),
    )?;

    let records = state.store.list_all().await?;
    let needle = query.q.as_deref().unwrap_or_default();
    let matched = report::search(report::filter(&records, &filter), needle)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matched))
}

/// `GET /reports/summary`
pub async fn report_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let records = state.store.list_all().await?;
    let summary = report::summarize(&records);
    Ok(Json(SummaryResponse {
        status_counts: summary.status_counts(),
        summary,
    }))
}

/// `GET /reports/sections`
pub async fn report_sections(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let records = state.store.list_all().await?;
    Ok(Json(
        report::distinct_sections(&records)
            .into_iter()
            .map(str::to_string)
            .collect(),
    ))
}

/// `GET /settings`
pub async fn settings(State(state): State<AppState>) -> Json<ViewSettings> {
    Json(state.settings())
}
