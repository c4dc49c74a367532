//! Roster view: the consumer side of a [`StudentStore`].
//!
//! Holds the last fetched record set and re-derives every report from it.
//! Each mutation goes to the store first and is followed by a full refetch;
//! a failed operation leaves the held records untouched and raises a
//! [`Notice`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{AppError, StoreError};
use crate::report::{self, ReportFilter, Summary};
use crate::student::{StudentDraft, StudentId, StudentRecord};
use crate::traits::StudentStore;

use super::settings::ViewSettings;

/// Message shown when listing fails.
pub const FETCH_FAILED: &str = "Failed to fetch students.";
/// Message shown when create or update fails.
pub const SAVE_FAILED: &str = "Failed to save student.";
/// Message shown when delete fails.
pub const DELETE_FAILED: &str = "Failed to delete student.";
/// Message shown after a create.
pub const ADDED: &str = "Student added!";
/// Message shown after an update.
pub const UPDATED: &str = "Student updated!";
/// Message shown after a delete.
pub const DELETED: &str = "Student deleted!";

/// User-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An operation succeeded.
    Success(String),
    /// An operation failed.
    Error(String),
}

impl Notice {
    /// The notification text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }

    /// Returns true for [`Notice::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// What happened to a refresh response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response replaced the held records.
    Applied,
    /// A newer refresh was issued meanwhile; the response was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct RosterState {
    records: Vec<StudentRecord>,
    loaded: bool,
    notices: Vec<Notice>,
}

/// Record list, search, report and dashboard over one store.
pub struct RosterView {
    store: Arc<dyn StudentStore>,
    settings: ViewSettings,
    state: RwLock<RosterState>,
    generation: AtomicU64,
}

impl std::fmt::Debug for RosterView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterView")
            .field("settings", &self.settings)
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl RosterView {
    /// Create a view with nothing loaded yet. Call [`refresh`](Self::refresh)
    /// to fetch.
    #[must_use]
    pub fn new(store: Arc<dyn StudentStore>, settings: ViewSettings) -> Self {
        Self {
            store,
            settings,
            state: RwLock::new(RosterState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a view and fetch immediately. A failed fetch leaves the view
    /// empty with an error notice.
    pub async fn open(store: Arc<dyn StudentStore>, settings: ViewSettings) -> Self {
        let view = Self::new(store, settings);
        // Failure is already logged and surfaced as a notice.
        let _ = view.refresh().await;
        view
    }

    /// Settings this view was built with.
    #[must_use]
    pub const fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Fetch all records from the store.
    ///
    /// Only the most recently issued refresh may replace the held records;
    /// an older response that arrives late is discarded.
    ///
    /// # Errors
    ///
    /// Returns the store error when the current fetch fails. The held records
    /// are kept and a [`FETCH_FAILED`] notice is raised.
    pub async fn refresh(&self) -> Result<RefreshOutcome, StoreError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.store.list_all().await;

        let mut state = self.write_state();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Discarding stale student list");
            return Ok(RefreshOutcome::Stale);
        }

        match result {
            Ok(records) => {
                tracing::debug!(generation, count = records.len(), "Student list refreshed");
                state.records = records;
                state.loaded = true;
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch students");
                state.notices.push(Notice::Error(FETCH_FAILED.to_string()));
                Err(e)
            }
        }
    }

    /// Validate `draft` and create it, or replace the record at `editing`.
    /// Refetches on success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] before reaching the store if the
    /// draft is invalid, or [`AppError::Store`] if the write fails.
    pub async fn save(
        &self,
        draft: &StudentDraft,
        editing: Option<&StudentId>,
    ) -> Result<StudentId, AppError> {
        let student = match draft.validate(&self.settings.default_status) {
            Ok(student) => student,
            Err(e) => {
                tracing::warn!(field = e.field(), error = %e, "Rejected student draft");
                self.notify(Notice::Error(e.to_string()));
                return Err(e.into());
            }
        };

        let written = match editing {
            Some(id) => self.store.update(id, &student).await.map(|()| id.clone()),
            None => self.store.create(&student).await,
        };

        match written {
            Ok(id) => {
                let message = if editing.is_some() { UPDATED } else { ADDED };
                tracing::info!(%id, "{message}");
                self.notify(Notice::Success(message.to_string()));
                let _ = self.refresh().await;
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save student");
                self.notify(Notice::Error(SAVE_FAILED.to_string()));
                Err(e.into())
            }
        }
    }

    /// Delete the record at `id`, then refetch.
    ///
    /// # Errors
    ///
    /// Returns the store error if the delete fails; the held records are
    /// kept.
    pub async fn remove(&self, id: &StudentId) -> Result<(), StoreError> {
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "Student deleted");
                self.notify(Notice::Success(DELETED.to_string()));
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "Failed to delete student");
                self.notify(Notice::Error(DELETE_FAILED.to_string()));
                Err(e)
            }
        }
    }

    /// Returns true once a fetch has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.read_state().loaded
    }

    /// The held records, in store order.
    #[must_use]
    pub fn records(&self) -> Vec<StudentRecord> {
        self.read_state().records.clone()
    }

    /// Records whose name contains `needle`, ignoring case.
    #[must_use]
    pub fn search(&self, needle: &str) -> Vec<StudentRecord> {
        let state = self.read_state();
        report::search(&state.records, needle).into_iter().cloned().collect()
    }

    /// Records passing `filter`.
    #[must_use]
    pub fn report(&self, filter: &ReportFilter) -> Vec<StudentRecord> {
        let state = self.read_state();
        report::filter(&state.records, filter).into_iter().cloned().collect()
    }

    /// Dashboard statistics over the held records.
    #[must_use]
    pub fn dashboard(&self) -> Summary {
        report::summarize(&self.read_state().records)
    }

    /// Section choices for the report filter.
    #[must_use]
    pub fn sections(&self) -> Vec<String> {
        report::distinct_sections(&self.read_state().records)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Drain pending notices, oldest first.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.write_state().notices)
    }

    fn notify(&self, notice: Notice) {
        self.write_state().notices.push(notice);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, RosterState> {
        self.state.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Reading roster from poisoned lock, using recovered data");
            poisoned.into_inner()
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RosterState> {
        self.state.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Writing roster through poisoned lock, using recovered data");
            poisoned.into_inner()
        })
    }
}
