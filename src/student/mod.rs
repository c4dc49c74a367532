//! Student record domain.
//!
//! This module provides:
//! - The persisted entity ([`StudentRecord`]) and its field types
//! - Boundary validation of create/update payloads ([`StudentDraft`])
//!
//! # Example
//!
//! ```
//! use student_records::student::{Status, StudentDraft};
//!
//! let student = StudentDraft::new()
//!     .with_name("Anna")
//!     .with_section("Rizal")
//!     .with_grade(92)
//!     .validate(&Status::Passed)
//!     .unwrap();
//!
//! assert_eq!(student.status, Status::Passed);
//! ```

mod draft;
mod types;

pub use draft::StudentDraft;
pub use types::{Grade, NewStudent, Status, StudentId, StudentRecord};
