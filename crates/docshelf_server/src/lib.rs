//! HTTP server wiring for the docshelf blob store (API, handlers, state).

/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for document endpoints.
pub mod handlers;
/// Server-side document blob store.
pub mod store;

pub use docshelf_core::{config, Config, DEFAULT_PORT};
pub use store::FileStore;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state.
    pub fn new(config: Config, store: FileStore) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState) -> Router {
    let max_body = state.config.max_file_size;

    Router::new()
        .route("/api/health", get(handlers::docs::health))
        .route(
            "/api/docs",
            get(handlers::docs::list_docs).delete(handlers::docs::delete_all),
        )
        .route("/api/docs/:id", delete(handlers::docs::delete_doc))
        .route("/api/docs/:id/download", get(handlers::docs::download))
        .route("/api/upload", post(handlers::docs::upload))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolve the listener address for the configured port (loopback only).
pub fn bind_address(config: &Config) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], config.port))
}
