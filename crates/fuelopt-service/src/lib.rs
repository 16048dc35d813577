//! Fuel optimizer HTTP service.
//!
//! # Endpoints
//!
//! - `GET /` - Welcome message and endpoint index
//! - `GET /api/v1/aircraft` - Aircraft directory, sorted by type
//! - `POST /api/v1/aircraft/reload` - Re-read `aircraft.csv`
//! - `GET /api/v1/estimate/{aircraft}/{route_file}` - Fuel for one route
//! - `POST /api/v1/optimize/{aircraft}` - Compare several routes
//! - `GET /api/v1/routes` - Route files in the data directory
//! - `POST /api/v1/routes` - Upload a route CSV
//! - `GET /api/v1/ask-agent?question=...` - Free-form question to the assistant
//! - `GET /metrics`, `GET /health/live`, `GET /health/ready`
//!
//! Errors are RFC 9457 Problem Details whose `instance` is the request ID.

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use fuelopt_service_shared::{health_live, health_ready, metrics_handler, AppState, MetricsLayer};

/// Build the service router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1/aircraft", get(handlers::list_aircraft))
        .route("/api/v1/aircraft/reload", post(handlers::reload_aircraft))
        .route(
            "/api/v1/estimate/{aircraft}/{route_file}",
            get(handlers::estimate_route),
        )
        .route("/api/v1/optimize/{aircraft}", post(handlers::optimize_routes))
        .route(
            "/api/v1/routes",
            get(handlers::list_routes).post(handlers::upload_route),
        )
        .route("/api/v1/ask-agent", get(handlers::ask_agent))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
