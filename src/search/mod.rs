//! Search Module
//!
//! Free-text vehicle search and the input gate that sits in front of it.
//!
//! ## Overview
//! A query is matched case-insensitively against model names and manufacturer names, and the
//! first 50 matches (by make, then model) are returned. Interactive front-ends do not call the
//! search on every keystroke: they feed input into a debouncer that waits for typing to pause
//! and only lets the latest search update what is shown.
//!
//! ## Submodules
//! - **`engine`**: `SearchService` and the `VehicleSearch` trait. Fail-open on store errors.
//! - **`debounce`**: `DebouncedSearch`, the 500 ms input gate with last-query-wins results.
//! - **`handlers`**: HTTP handler for `GET /search`.
//! - **`types`**: Request/response DTOs and the visible search snapshot.

pub mod debounce;
pub mod engine;
pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
