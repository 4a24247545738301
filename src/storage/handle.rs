//! Shared Store Handle
//!
//! The process holds exactly one [`SqliteStore`]. It is opened lazily by the first caller of
//! [`shared_store`] and every later caller receives a clone of the same `Arc`, so no request
//! path ever opens a connection of its own.
//!
//! Binaries take the handle once at start-up and pass it down explicitly; nothing below the
//! binaries reaches for this global.

use super::error::StorageResult;
use super::sqlite::SqliteStore;

use std::sync::Arc;
use tokio::sync::OnceCell;

static SHARED: OnceCell<Arc<SqliteStore>> = OnceCell::const_new();

/// Returns the process-wide store, opening it at `path` on first use.
///
/// Later calls ignore `path` and return the handle opened by the first call. A failed open
/// leaves the cell empty so the next call tries again.
pub async fn shared_store(path: &str) -> StorageResult<Arc<SqliteStore>> {
    let store = SHARED
        .get_or_try_init(|| async {
            tracing::info!("Initializing shared catalog store ({})", path);
            SqliteStore::open(path).map(Arc::new)
        })
        .await?;

    Ok(store.clone())
}

/// True once the shared store has been opened.
pub fn is_initialized() -> bool {
    SHARED.initialized()
}
