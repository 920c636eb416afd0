use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::*;
use crate::config::ServerConfig;

pub fn create_router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/egsa87", get(to_egsa87))
        .route("/api/wgs84", get(to_wgs84))
        .route("/api/well-location/convert", post(convert_location))
        .route("/api/upload", post(upload_csv))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.body_limit_bytes))
                .layer(CorsLayer::permissive()),
        )
}
