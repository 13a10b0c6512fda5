use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use watermark_core::config::CorsConfig;

use super::{handlers, middleware::metrics_middleware, watermark};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;
    let body_limit = server.max_body_bytes;
    let cors = cors_layer(&state.config().cors);

    // Watermark jobs
    let watermark_routes = Router::new()
        .route("/upload", post(watermark::upload))
        .route("/upload-url", post(watermark::upload_url))
        .route(
            "/trigger-watermark-process",
            post(watermark::trigger_watermark_process),
        );

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .nest("/watermark", watermark_routes)
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS policy. Entries that are not valid header values are
/// skipped with a warning.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| match m.parse() {
            Ok(method) => Some(method),
            Err(_) => {
                warn!("Ignoring invalid CORS method {:?}", m);
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|h| match h.parse() {
            Ok(name) => Some(name),
            Err(_) => {
                warn!("Ignoring invalid CORS header {:?}", h);
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(methods).allow_headers(headers);

    // Credentials cannot be combined with a wildcard origin, so none are allowed.
    if config.allows_any_origin() {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {:?}", o);
                    None
                }
            })
            .collect();
        layer.allow_origin(origins)
    }
}
