//! HTTP surface: route table, shared layers and graceful shutdown.

use crate::catalog::handlers::{
    handle_get_manufacturer, handle_get_vehicle, handle_list_manufacturers, handle_list_vehicles,
};
use crate::posts::handlers::{handle_create_post, handle_list_posts};
use crate::search::engine::SearchService;
use crate::search::handlers::handle_search;
use crate::storage::CatalogStore;

use axum::http::{header, Method};
use axum::routing::get;
use axum::{Extension, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(store: Arc<dyn CatalogStore>) -> Router {
    let search = Arc::new(SearchService::new(store.clone()));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/manufacturers", get(handle_list_manufacturers))
        .route("/manufacturers/:id", get(handle_get_manufacturer))
        .route("/vehicles", get(handle_list_vehicles))
        .route("/vehicles/:id", get(handle_get_vehicle))
        .route("/search", get(handle_search))
        .route(
            "/api/posts",
            get(handle_list_posts).post(handle_create_post),
        )
        .layer(Extension(store))
        .layer(Extension(search))
        .layer(cors)
}

/// Serves `router` on `listener` until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, router: Router) -> anyhow::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
