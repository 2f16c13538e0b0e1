//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::handlers::{
    evict_all_handler, evict_handler, get_all_handler, get_handler, health_handler, put_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// The collection routes under `/api/lru` also answer with a trailing slash.
///
/// - `POST /api/lru` - Store a key-value pair
/// - `GET /api/lru` - List every key and value
/// - `DELETE /api/lru` - Remove every entry
/// - `GET /api/lru/:key` - Retrieve a value by key
/// - `DELETE /api/lru/:key` - Remove a key
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Catch panic: turns a panicking handler into a 500 response
/// - Tracing: logs all requests
pub fn create_router(state: AppState) -> Router {
    let collection = post(put_handler)
        .get(get_all_handler)
        .delete(evict_all_handler);

    Router::new()
        .route("/api/lru", collection.clone())
        .route("/api/lru/", collection)
        .route("/api/lru/:key", get(get_handler).delete(evict_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
