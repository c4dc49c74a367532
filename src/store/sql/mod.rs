//! Relational binding.
//!
//! The store uses `SQLite` with the `sqlx` crate for async operations:
//! - `core`: Pool management, migrations, and error mapping
//! - `students`: Row-level CRUD statements
//! - `trait_impl`: `StudentStore` implementation
//!
//! Update and delete check the affected row count, so a missing id is
//! reported as [`StoreError::NotFound`](crate::error::StoreError::NotFound)
//! rather than a silent success.
//!
//! # Example
//!
//! ```ignore
//! use student_records::store::SqlStore;
//!
//! let store = SqlStore::new("./data/students.db").await?;
//! let records = store.list_all().await?;
//! ```

mod core;
mod students;
mod trait_impl;

pub use self::core::SqlStore;
