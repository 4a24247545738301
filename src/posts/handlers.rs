use super::types::{CreatePostRequest, Post};
use crate::error::AppError;
use crate::storage::CatalogStore;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_list_posts(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = store
        .list_posts()
        .await
        .map_err(|e| AppError::internal("Failed to fetch posts", e))?;

    Ok(Json(posts))
}

/// `POST /api/posts`. The body is taken as a `Result` so that an unparseable payload is
/// reported in the same `{"error": ...}` shape as every other failure.
pub async fn handle_create_post(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected post body: {}", e);
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let new_post = request
        .into_new_post()
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;

    let post = store
        .create_post(new_post)
        .await
        .map_err(|e| AppError::internal("Failed to create post", e))?;

    tracing::info!("Created post {} '{}'", post.id, post.title);
    Ok((StatusCode::CREATED, Json(post)))
}
