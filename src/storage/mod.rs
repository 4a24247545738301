//! Storage Module
//!
//! Relational persistence for the catalog and the posts resource.
//!
//! ## Components
//! - **`backend`**: The `CatalogStore` trait every caller programs against.
//! - **`sqlite`**: The embedded SQLite implementation (schema, queries, upserts).
//! - **`handle`**: The lazily opened, process-wide store handle.
//! - **`seed`**: Out-of-band import of manufacturers and vehicles from a JSON file.
//! - **`error`**: `StorageError` and `StorageResult`.

pub mod backend;
pub mod error;
pub mod handle;
pub mod seed;
pub mod sqlite;

pub use backend::CatalogStore;
pub use error::{StorageError, StorageResult};
pub use sqlite::SqliteStore;

#[cfg(test)]
pub(crate) mod testing;
