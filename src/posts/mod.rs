//! Posts Module
//!
//! A minimal create/list resource served under `/api/posts`.

pub mod handlers;
pub mod types;
