//! Main application router.

use crate::{
    controllers::{chat_controller, health_controller, media_controller},
    realtime,
    state::AppState,
};
use palaver_config::ServerConfig;
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    let router = Router::new()
        // Health endpoints (no auth required)
        .merge(health_controller::router())
        // API v1
        .nest("/api/v1", chat_controller::router())
        // Media blobs
        .merge(media_controller::router())
        // WebSocket upgrade for real-time delivery
        .route("/ws", get(realtime::ws_handler))
        // Root endpoint
        .route("/", get(root))
        .with_state(state)
        .layer(cors)
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(TraceLayer::new_for_http());

    info!("Router created with REST endpoints and /ws upgrade");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.cors_enabled {
        if server_config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    } else {
        CorsLayer::new()
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Palaver API v1"
}
