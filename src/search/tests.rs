//! Search Module Tests
//!
//! Validates the search service contract and the debounced input gate.
//!
//! ## Test Scopes
//! - **Service**: blank-query short circuit, case-insensitive matching, row cap, fail-open.
//! - **Debounce**: one dispatch per quiet period, using the latest input.
//! - **Ordering**: only the most recently dispatched search may become visible.
//! - **HTTP**: `GET /search` through the assembled router.

#[cfg(test)]
mod tests {
    use crate::catalog::types::{ManufacturerName, Vehicle, VehicleWithManufacturerName};
    use crate::search::debounce::{DebouncedSearch, DEBOUNCE_DELAY};
    use crate::search::engine::{search_vehicles, SearchService, VehicleSearch, MAX_RESULTS};
    use crate::search::types::SearchResponse;
    use crate::server::build_router;
    use crate::storage::testing::{manufacturer, model, seeded_store, CountingStore, FailingStore};
    use crate::storage::{CatalogStore, SqliteStore};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::ServiceExt;

    fn vehicle_named(name: &str) -> VehicleWithManufacturerName {
        VehicleWithManufacturerName {
            vehicle: Vehicle {
                id: 1,
                model_name: name.to_string(),
                model_year: "2020".to_string(),
                manufacturer_id: 1,
                image: None,
                production_years: None,
                model_years: None,
                class: None,
                body_style: None,
            },
            manufacturer: ManufacturerName {
                manu_name: "Test Motors".to_string(),
            },
        }
    }

    /// Backend that records every query and answers after a per-query delay with a single
    /// vehicle named after the query.
    struct ScriptedSearch {
        calls: Mutex<Vec<String>>,
        delays: HashMap<String, Duration>,
    }

    impl ScriptedSearch {
        fn new() -> Arc<Self> {
            Self::with_delays(&[])
        }

        fn with_delays(delays: &[(&str, u64)]) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                delays: delays
                    .iter()
                    .map(|(q, ms)| (q.to_string(), Duration::from_millis(*ms)))
                    .collect(),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VehicleSearch for ScriptedSearch {
        async fn search(&self, query: &str) -> Vec<VehicleWithManufacturerName> {
            self.calls.lock().unwrap().push(query.to_string());
            let delay = self
                .delays
                .get(query)
                .copied()
                .unwrap_or(Duration::from_millis(10));
            tokio::time::sleep(delay).await;
            vec![vehicle_named(query)]
        }
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    // ============================================================
    // SEARCH SERVICE
    // ============================================================

    #[tokio::test]
    async fn test_blank_query_skips_store() {
        let store = CountingStore::new(SqliteStore::open_in_memory().unwrap());

        assert!(search_vehicles(&store, "").await.is_empty());
        assert!(search_vehicles(&store, "   ").await.is_empty());
        assert!(search_vehicles(&store, "\t\n").await.is_empty());

        assert_eq!(store.calls(), 0, "Store must not be contacted for blank queries");
    }

    #[tokio::test]
    async fn test_non_blank_query_reaches_store() {
        let store = CountingStore::new(SqliteStore::open_in_memory().unwrap());

        search_vehicles(&store, "golf").await;
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_every_result_contains_query() {
        let store = seeded_store().await;

        for query in ["o", "OR", "to", "Golf", "volks", "r"] {
            let results = search_vehicles(store.as_ref(), query).await;
            assert!(!results.is_empty(), "'{}' should match something", query);

            let needle = query.to_lowercase();
            for v in &results {
                assert!(
                    v.model_name().to_lowercase().contains(&needle)
                        || v.manu_name().to_lowercase().contains(&needle),
                    "{} {} does not contain '{}'",
                    v.manu_name(),
                    v.model_name(),
                    query
                );
            }
        }
    }

    #[tokio::test]
    async fn test_query_with_surrounding_spaces_is_matched_verbatim() {
        let store = seeded_store().await;

        // "Land Cruiser" contains " c"; no name contains " z"
        let hits = search_vehicles(store.as_ref(), " c").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].model_name(), "Land Cruiser");
        assert!(search_vehicles(store.as_ref(), " z").await.is_empty());
    }

    #[tokio::test]
    async fn test_results_capped_at_fifty() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store
            .upsert_manufacturer(&manufacturer("Generic", "Nowhere"))
            .await
            .unwrap();
        for i in 0..75 {
            store
                .upsert_vehicle(id, &model(&format!("Model {:03}", i), "2000"))
                .await
                .unwrap();
        }

        let results = search_vehicles(&store, "generic").await;

        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(results[0].model_name(), "Model 000");
        assert_eq!(results[49].model_name(), "Model 049");
    }

    #[tokio::test]
    async fn test_store_failure_yields_empty_results() {
        let results = search_vehicles(&FailingStore, "corolla").await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_service_delegates_to_store() {
        let store: Arc<dyn CatalogStore> = seeded_store().await;
        let service = SearchService::new(store);

        let results = service.search("supra").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].manu_name(), "Toyota");
    }

    // ============================================================
    // DEBOUNCE
    // ============================================================

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_inputs_dispatches_once_with_last_value() {
        let backend = ScriptedSearch::new();
        let debouncer = DebouncedSearch::new(backend.clone());

        debouncer.input("c");
        advance(100).await;
        debouncer.input("co");
        advance(100).await;
        debouncer.input("cor");

        advance(1_000).await;

        assert_eq!(backend.calls(), vec!["cor"]);
        assert_eq!(debouncer.dispatched(), 1);

        let snapshot = debouncer.snapshot();
        assert_eq!(snapshot.query, "cor");
        assert_eq!(snapshot.results[0].model_name(), "cor");
        assert!(!snapshot.is_searching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_dispatched_before_window_elapses() {
        let backend = ScriptedSearch::new();
        let debouncer = DebouncedSearch::new(backend.clone());

        debouncer.input("golf");
        advance(DEBOUNCE_DELAY.as_millis() as u64 - 1).await;
        assert!(backend.calls().is_empty());
        assert!(!debouncer.is_searching());

        advance(2).await;
        assert_eq!(backend.calls(), vec!["golf"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_quiet_period_dispatches_once() {
        let backend = ScriptedSearch::new();
        let debouncer = DebouncedSearch::new(backend.clone());

        debouncer.input("ford");
        advance(600).await;
        debouncer.input("toyota");
        advance(600).await;

        assert_eq!(backend.calls(), vec!["ford", "toyota"]);
        assert_eq!(debouncer.snapshot().query, "toyota");
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_progress_flag_covers_the_search() {
        let backend = ScriptedSearch::with_delays(&[("slow", 1_000)]);
        let debouncer = DebouncedSearch::new(backend.clone());

        debouncer.input("slow");
        advance(600).await;
        assert!(debouncer.is_searching(), "Search dispatched at 500ms, resolves at 1500ms");
        assert!(debouncer.snapshot().results.is_empty());

        advance(1_000).await;
        assert!(!debouncer.is_searching());
        assert_eq!(debouncer.snapshot().query, "slow");
    }

    // ============================================================
    // LAST QUERY WINS
    // ============================================================

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_discarded() {
        // A dispatched at 500ms, resolves at 1500ms.
        // B dispatched at 1100ms, resolves at 1110ms.
        let backend = ScriptedSearch::with_delays(&[("a", 1_000), ("b", 10)]);
        let debouncer = DebouncedSearch::new(backend.clone());

        debouncer.input("a");
        advance(600).await;
        debouncer.input("b");

        advance(600).await; // t = 1200
        let snapshot = debouncer.snapshot();
        assert_eq!(snapshot.query, "b");
        assert_eq!(snapshot.seq, 2);
        assert!(!snapshot.is_searching);

        advance(800).await; // t = 2000, A has resolved
        let snapshot = debouncer.snapshot();
        assert_eq!(snapshot.query, "b");
        assert_eq!(snapshot.results[0].model_name(), "b");
        assert_eq!(backend.calls(), vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_order_results_both_become_visible() {
        let backend = ScriptedSearch::with_delays(&[("a", 50), ("b", 50)]);
        let debouncer = DebouncedSearch::new(backend.clone());
        let mut updates = debouncer.subscribe();

        debouncer.input("a");
        advance(600).await;
        assert_eq!(debouncer.snapshot().query, "a");

        debouncer.input("b");
        advance(600).await;
        assert_eq!(debouncer.snapshot().query, "b");

        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().seq, 2);
    }

    // ============================================================
    // EXPLICIT SUBMIT
    // ============================================================

    #[tokio::test(start_paused = true)]
    async fn test_submit_skips_window_and_drops_pending_input() {
        let backend = ScriptedSearch::new();
        let debouncer = DebouncedSearch::new(backend.clone());

        debouncer.input("typing");
        assert!(debouncer.submit("mustang"));
        assert!(debouncer.is_searching());

        advance(1_000).await;
        assert_eq!(backend.calls(), vec!["mustang"]);
        assert_eq!(debouncer.snapshot().query, "mustang");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_refused_while_searching() {
        let backend = ScriptedSearch::with_delays(&[("first", 1_000)]);
        let debouncer = DebouncedSearch::new(backend.clone());

        assert!(debouncer.submit("first"));
        advance(10).await;
        assert!(!debouncer.submit("second"));

        advance(1_000).await;
        assert!(debouncer.submit("third"));
        advance(100).await;

        assert_eq!(backend.calls(), vec!["first", "third"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_store_failure_shows_no_results() {
        let store: Arc<dyn CatalogStore> = Arc::new(FailingStore);
        let debouncer = DebouncedSearch::new(Arc::new(SearchService::new(store)));

        debouncer.input("golf");
        advance(600).await;

        let snapshot = debouncer.snapshot();
        assert_eq!(snapshot.query, "golf");
        assert!(snapshot.results.is_empty());
        assert!(!snapshot.is_searching);
    }

    // ============================================================
    // HTTP
    // ============================================================

    async fn get_search(store: Arc<dyn CatalogStore>, uri: &str) -> (StatusCode, SearchResponse) {
        let router = build_router(store);
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = router.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_search_endpoint_returns_matches() {
        let (status, body) = get_search(seeded_store().await, "/search?q=volks").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.query, "volks");
        assert_eq!(body.count, 2);
        assert_eq!(body.results[0].model_name(), "Corrado");
        assert_eq!(body.meta.title, "Search - Car Encyclopedia");
    }

    #[tokio::test]
    async fn test_search_endpoint_without_query_is_empty() {
        let (status, body) = get_search(seeded_store().await, "/search").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.count, 0);
        assert!(body.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_endpoint_fails_open() {
        let (status, body) = get_search(Arc::new(FailingStore), "/search?q=golf").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.results.is_empty());
    }
}
