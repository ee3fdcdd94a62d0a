mod handlers;
mod state;

use axum::Router;
use axum::routing::get;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::DiscoveryConfig;
use crate::discovery::GeoDiscoveryService;

pub fn build_router(config: &DiscoveryConfig) -> Router {
    router_with_service(GeoDiscoveryService::new(config))
}

/// Router over an already-built service (custom providers, tests).
pub fn router_with_service(service: GeoDiscoveryService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/restaurants", get(handlers::restaurants))
        .route("/api/restaurants/seed", get(handlers::seed_list))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, config: &DiscoveryConfig) -> std::io::Result<()> {
    let app = build_router(config);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, offline = config.offline, "DishDirect discovery API listening");
    axum::serve(listener, app).await
}
