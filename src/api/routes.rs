//! API Routes
//!
//! Configures the Axum router with all news API endpoints.

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    cache_stats_handler, create_handler, delete_handler, get_handler, health_handler,
    list_handler, update_handler, AppState, X_TOTAL_COUNT,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /noticias` - Create a news item
/// - `GET /noticias` - List news items (`page`, `limit`, `search`)
/// - `GET /noticias/:id` - Fetch one news item
/// - `PATCH /noticias/:id` - Partially update a news item
/// - `DELETE /noticias/:id` - Remove a news item
/// - `GET /cache/stats` - Listing cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows the configured frontend origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.frontend_url);

    Router::new()
        .route("/noticias", get(list_handler).post(create_handler))
        .route(
            "/noticias/:id",
            get(get_handler).patch(update_handler).delete(delete_handler),
        )
        .route("/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the frontend: credentials allowed, `X-Total-Count` readable.
///
/// Falls back to any origin without credentials if `origin` is not a valid
/// header value.
fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([X_TOTAL_COUNT.clone()]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => cors.allow_origin(origin).allow_credentials(true),
        Err(_) => {
            warn!(origin, "Invalid CORS origin, allowing any origin");
            cors.allow_origin(Any)
        }
    }
}
