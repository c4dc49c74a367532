//! Document-store binding.
//!
//! Talks to a hosted document database over its REST API. Records live in
//! a collection named `students`; the document key is the record id.
//!
//! - `config`: Connection settings and collection URL
//! - `fields`: Typed-field wire format and schemaless decoding
//! - `client`: `StudentStore` implementation over `reqwest`
//!
//! # Example
//!
//! ```ignore
//! use student_records::store::{DocumentStore, DocumentStoreConfig};
//!
//! let config = DocumentStoreConfig::new("my-project").with_api_key("key");
//! let store = DocumentStore::new(config)?;
//! let records = store.list_all().await?;
//! ```

mod client;
mod config;
mod fields;

pub use client::DocumentStore;
pub use config::{DocumentStoreConfig, COLLECTION, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_MS};
