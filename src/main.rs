use car_catalog::config::Config;
use car_catalog::server::{build_router, serve};
use car_catalog::storage::handle::shared_store;
use car_catalog::storage::seed::{apply_seed, load_seed_file};
use car_catalog::storage::CatalogStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = Config::from_env()?;
    config.apply_args(&args)?;

    tracing::info!("Starting catalog on {}", config.bind_addr);

    // 1. Storage:
    let sqlite = shared_store(&config.database).await?;
    let store: Arc<dyn CatalogStore> = sqlite.clone();

    // 2. Optional seed import:
    if let Some(path) = &config.seed_file {
        let seed = load_seed_file(path).await?;
        let summary = apply_seed(store.as_ref(), &seed).await?;
        tracing::info!(
            "Catalog ready: {} manufacturers, {} vehicles",
            summary.manufacturers,
            summary.vehicles
        );
    }

    // 3. HTTP server:
    let app = build_router(store.clone());
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    serve(listener, app).await?;

    tracing::info!("Server stopped, releasing catalog store");
    drop(store);
    sqlite.close()?;

    Ok(())
}
