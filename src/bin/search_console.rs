//! Interactive search prompt.
//!
//! Every line read from stdin is treated as the current content of a search box and fed
//! through the debouncer. Lines starting with `!` are submitted immediately. Visible state
//! is printed whenever it changes.
//!
//! ```sh
//! search-console --database catalog.db --seed data/seed.json
//! ```

use car_catalog::config::Config;
use car_catalog::search::debounce::{DebouncedSearch, DEBOUNCE_DELAY};
use car_catalog::search::engine::SearchService;
use car_catalog::storage::handle::shared_store;
use car_catalog::storage::seed::{apply_seed, load_seed_file};
use car_catalog::storage::CatalogStore;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = Config::from_env()?;
    config.apply_args(&args)?;

    let sqlite = shared_store(&config.database).await?;
    let store: Arc<dyn CatalogStore> = sqlite.clone();
    if let Some(path) = &config.seed_file {
        let seed = load_seed_file(path).await?;
        apply_seed(store.as_ref(), &seed).await?;
    }

    let search = DebouncedSearch::new(Arc::new(SearchService::new(store)));

    let mut updates = search.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.is_searching {
                println!("... searching");
                continue;
            }

            println!("[#{}] '{}': {} results", snapshot.seq, snapshot.query, snapshot.results.len());
            for vehicle in &snapshot.results {
                println!(
                    "  {} {} ({})",
                    vehicle.manu_name(),
                    vehicle.model_name(),
                    vehicle.model_year()
                );
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.strip_prefix('!') {
            Some(query) => {
                if !search.submit(query) {
                    println!("(search in progress, submit ignored)");
                }
            }
            None => search.input(line),
        }
    }

    // Let the last debounced search finish before exiting.
    tokio::time::sleep(DEBOUNCE_DELAY * 2).await;
    drop(search);
    printer.abort();
    sqlite.close()?;

    Ok(())
}
