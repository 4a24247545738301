use crate::catalog::types::VehicleWithManufacturerName;
use crate::storage::CatalogStore;

use async_trait::async_trait;
use std::sync::Arc;

/// Upper bound on the number of rows a single search returns.
pub const MAX_RESULTS: usize = 50;

/// Anything that can answer a free-text vehicle search.
///
/// Implementations never fail: an unavailable backend answers with an empty list.
#[async_trait]
pub trait VehicleSearch: Send + Sync + 'static {
    async fn search(&self, query: &str) -> Vec<VehicleWithManufacturerName>;
}

/// Free-text vehicle search over a [`CatalogStore`].
pub struct SearchService {
    store: Arc<dyn CatalogStore>,
}

impl SearchService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VehicleSearch for SearchService {
    async fn search(&self, query: &str) -> Vec<VehicleWithManufacturerName> {
        search_vehicles(self.store.as_ref(), query).await
    }
}

/// Vehicles whose model name or manufacturer name contains `query`, ignoring case.
///
/// - Blank queries return nothing and never reach the store.
/// - At most [`MAX_RESULTS`] rows, ordered by make then model.
/// - A store failure is logged and answered with an empty list.
pub async fn search_vehicles(
    store: &dyn CatalogStore,
    query: &str,
) -> Vec<VehicleWithManufacturerName> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    match store.search_vehicles(query, MAX_RESULTS).await {
        Ok(mut results) => {
            results.truncate(MAX_RESULTS);
            tracing::debug!("Search '{}' matched {} vehicles", query, results.len());
            results
        }
        Err(e) => {
            tracing::error!("Search failed for '{}': {}", query, e);
            Vec::new()
        }
    }
}
