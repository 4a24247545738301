use super::engine::{SearchService, VehicleSearch};
use super::types::{SearchParams, SearchResponse};
use crate::catalog::meta::search_meta;

use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

/// `GET /search?q=...`. Always answers 200; failures surface as an empty result list.
pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(search): Extension<Arc<SearchService>>,
) -> Json<SearchResponse> {
    let query = params.q.unwrap_or_default();
    let results = search.search(&query).await;

    Json(SearchResponse {
        meta: search_meta(),
        count: results.len(),
        query,
        results,
    })
}
