//! Headless blob store server entrypoint.

use docshelf_server::{bind_address, create_app, AppState, Config, FileStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docshelf=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let store = FileStore::open(&config.db_path)?;
    tracing::info!("Database opened at {}", config.db_path);

    let addr = bind_address(&config);
    let state = AppState::new(config, store);
    let app = create_app(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.store.flush()?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}
