//! Catalog Module
//!
//! Manufacturers and vehicle models: the data types, the list and detail pages, and the
//! in-memory sort applied to the vehicle list.
//!
//! ## Submodules
//! - **`types`**: Entities, joined shapes and page response DTOs.
//! - **`sort`**: Multi-key vehicle sorting (`year_desc`, `make_asc`, `model_asc`).
//! - **`meta`**: Page titles and descriptions.
//! - **`handlers`**: Axum handlers for `/manufacturers` and `/vehicles`.

pub mod handlers;
pub mod meta;
pub mod sort;
pub mod types;
