//! Debounced Search
//!
//! Gate between a stream of input events (keystrokes) and a [`VehicleSearch`] backend.
//!
//! ## Behaviour
//! - **Debounce**: every `input` restarts a 500 ms window. A search is dispatched only when the
//!   window elapses without further input, using the latest value.
//! - **In-progress flag**: `is_searching` is set when a search is dispatched and cleared when the
//!   latest dispatched search resolves. Explicit `submit` calls are refused while it is set.
//! - **Last query wins**: each dispatch takes the next sequence number. A result whose number is
//!   no longer the latest is dropped when it arrives; the in-flight call itself is not cancelled.
//!
//! All state visible to a front-end lives in a `watch` channel of [`SearchSnapshot`]; the
//! sequence counter is only touched under that channel's lock.
//!
//! Must be used from within a Tokio runtime.

use super::engine::VehicleSearch;
use super::types::SearchSnapshot;
use crate::catalog::types::VehicleWithManufacturerName;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Quiet period required before a search is dispatched.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

pub struct DebouncedSearch<S: VehicleSearch> {
    shared: Arc<Shared<S>>,
    delay: Duration,
    /// Timer of the not-yet-dispatched input, if any.
    pending: Mutex<Option<JoinHandle<()>>>,
}

struct Shared<S> {
    backend: Arc<S>,
    /// Sequence number of the most recently dispatched search.
    issued: AtomicU64,
    state: watch::Sender<SearchSnapshot>,
}

impl<S: VehicleSearch> DebouncedSearch<S> {
    pub fn new(backend: Arc<S>) -> Self {
        Self::with_delay(backend, DEBOUNCE_DELAY)
    }

    pub fn with_delay(backend: Arc<S>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SearchSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                backend,
                issued: AtomicU64::new(0),
                state,
            }),
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Records an input event. Restarts the debounce window.
    pub fn input(&self, query: impl Into<String>) {
        let query = query.into();
        let shared = self.shared.clone();
        let delay = self.delay;

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.dispatch(query);
        });

        if let Some(previous) = self.replace_pending(Some(timer)) {
            previous.abort();
        }
    }

    /// Dispatches `query` immediately, dropping any pending input.
    ///
    /// Returns `false` without dispatching while a search is in progress.
    pub fn submit(&self, query: impl Into<String>) -> bool {
        if self.is_searching() {
            tracing::debug!("Ignoring submit while a search is in progress");
            return false;
        }

        if let Some(previous) = self.replace_pending(None) {
            previous.abort();
        }
        self.shared.dispatch(query.into());
        true
    }

    pub fn is_searching(&self) -> bool {
        self.shared.state.borrow().is_searching
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.state.borrow().clone()
    }

    /// Receives every change to the visible state.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.state.subscribe()
    }

    /// Number of searches dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.shared.issued.load(Ordering::SeqCst)
    }

    fn replace_pending(&self, next: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *pending, next)
    }
}

impl<S: VehicleSearch> Drop for DebouncedSearch<S> {
    fn drop(&mut self) {
        if let Some(pending) = self.replace_pending(None) {
            pending.abort();
        }
    }
}

impl<S: VehicleSearch> Shared<S> {
    fn dispatch(self: &Arc<Self>, query: String) {
        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_searching = true;
        });

        tracing::debug!("Dispatching search #{} for '{}'", seq, query);

        let shared = self.clone();
        tokio::spawn(async move {
            let results = shared.backend.search(&query).await;
            shared.commit(seq, query, results);
        });
    }

    fn commit(&self, seq: u64, query: String, results: Vec<VehicleWithManufacturerName>) {
        let committed = self.state.send_if_modified(|state| {
            if seq != self.issued.load(Ordering::SeqCst) {
                return false;
            }
            state.query = query;
            state.results = results;
            state.is_searching = false;
            state.seq = seq;
            true
        });

        if committed {
            tracing::trace!("Search #{} is now visible", seq);
        } else {
            tracing::debug!("Discarding stale results of search #{}", seq);
        }
    }
}
