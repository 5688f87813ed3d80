mod config;
mod error;
mod middleware;
mod routes;
mod state;

use std::sync::Arc;

use course_site_core::{
    ContentStore, FileSource, FileStorage, KeyValueStorage, MemoryStorage, Mode, StoreOptions,
    SyncBus,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = config::AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting course site content server");

    let storage: Arc<dyn KeyValueStorage> = match &config.store.storage_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Using file-backed storage");
            Arc::new(FileStorage::open(dir)?)
        }
        None => Arc::new(MemoryStorage::new()),
    };

    let sync_bus = SyncBus::new(config.sync_capacity);
    let mut store = ContentStore::new(
        StoreOptions::for_mode(Mode::Public, &config.store),
        storage,
        sync_bus.clone(),
    );
    store
        .initialize(&FileSource::new(config.content_path.clone()))
        .await;

    let state = state::AppState::new(config.clone(), store, sync_bus);

    let app = routes::build_router(state)
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
