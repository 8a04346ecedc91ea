use character_shop::config::AppConfig;
use character_shop::router::create_app_router;
use character_shop::state::AppState;
use character_shop::store::{CatalogStore, MongoCatalogStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("character_shop=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = AppConfig::from_env()?;

    // Connect the catalog store; the API keeps serving without one
    let store: Option<Arc<dyn CatalogStore>> = match &config.database {
        Some(database) => match MongoCatalogStore::connect(database).await {
            Ok(store) => {
                info!(database = %database.name, "Catalog store configured");
                Some(Arc::new(store) as Arc<dyn CatalogStore>)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create store client, continuing without it");
                None
            }
        },
        None => {
            tracing::warn!("DATABASE_URL / DATABASE_NAME not set, running without a catalog store");
            None
        }
    };

    let addr = config.socket_addr();

    // Initialize application state
    let state = Arc::new(AppState::new(config, store));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    info!(%addr, "Server running");

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
