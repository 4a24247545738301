//! Car Encyclopedia Catalog Library
//!
//! Read-mostly catalog of car manufacturers and their vehicle models, served over HTTP.
//! The binaries (`main.rs`, `bin/search_console.rs`) are thin wrappers around these modules.
//!
//! ## Modules
//! - **`catalog`**: Manufacturer and vehicle entities, list/detail pages, page metadata and the
//!   in-memory vehicle sort (`year_desc`, `make_asc`, `model_asc`).
//! - **`search`**: Case-insensitive substring search capped at 50 rows, plus a debounced,
//!   last-query-wins input gate for interactive front-ends.
//! - **`posts`**: A small create/list resource under `/api/posts`.
//! - **`storage`**: The `CatalogStore` trait, its SQLite implementation, the process-wide
//!   shared handle and the JSON seed importer.
//! - **`server`**: Route table, CORS and graceful shutdown.
//! - **`config`** / **`error`**: Runtime settings and the HTTP error type.

pub mod catalog;
pub mod config;
pub mod error;
pub mod posts;
pub mod search;
pub mod server;
pub mod storage;
