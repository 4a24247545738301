//! Post Data Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored post. Posts are created through the API and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated post, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
}

/// Body of `POST /api/posts`. Both fields are optional on the wire so that a missing
/// title is reported as a validation error rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl CreatePostRequest {
    /// Returns `None` when the title is missing or blank.
    pub fn into_new_post(self) -> Option<NewPost> {
        match self.title {
            Some(title) if !title.trim().is_empty() => Some(NewPost {
                title,
                content: self.content,
            }),
            _ => None,
        }
    }
}
