//! Consumer-side views over a store.
//!
//! - [`RosterView`]: fetch-on-open, mutate-then-refetch, derived reports
//! - [`ViewSettings`]: explicit theme and default-status context
//!
//! Settings are passed in at construction; nothing here reads global state.

mod roster;
mod settings;

pub use roster::{
    Notice, RefreshOutcome, RosterView, ADDED, DELETED, DELETE_FAILED, FETCH_FAILED, SAVE_FAILED,
    UPDATED,
};
pub use settings::{Theme, ViewSettings};
