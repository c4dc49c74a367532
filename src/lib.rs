//! Student Record Service
//!
//! A Rust service for student performance records: CRUD over one of two
//! interchangeable store bindings, plus pure report and dashboard
//! aggregation over the fetched records.
//!
//! # Features
//!
//! - `SQLite` binding with auto-incrementing ids
//! - Hosted document-store binding over REST with generated string keys
//! - Boundary validation with typed errors (no silent grade coercion)
//! - Status, section and grade-bucket filtering, search and summaries
//! - REST API with structured error bodies
//!
//! # Quick Start
//!
//! ```bash
//! STORE_BACKEND=sql DATABASE_PATH=./data/students.db ./student-records
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     HTTP      ┌─────────────────┐      ┌──────────────────┐
//! │  Dashboard  │──────────────▶│   REST server   │─────▶│ dyn StudentStore │
//! │  front-end  │◀──────────────│  (axum + report)│      └────────┬─────────┘
//! └─────────────┘     JSON      └─────────────────┘         ┌─────┴──────┐
//!                                                           ▼            ▼
//!                                                        SQLite    document API
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod report;
pub mod server;
pub mod store;
pub mod student;
pub mod traits;
pub mod view;

#[cfg(test)]
mod test_utils;
