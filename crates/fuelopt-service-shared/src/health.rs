//! Liveness and readiness probe handlers (`/health/live`, `/health/ready`).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Body returned by both probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    /// Number of aircraft in the directory (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_loaded: Option<usize>,

    /// Whether `/api/v1/ask-agent` has an upstream configured (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_configured: Option<bool>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            aircraft_loaded: None,
            assistant_configured: None,
        }
    }

    pub fn ready(service: &str, version: &str, aircraft: usize, assistant: bool) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            aircraft_loaded: Some(aircraft),
            assistant_configured: Some(assistant),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            aircraft_loaded: Some(0),
            assistant_configured: None,
        }
    }
}

/// Liveness probe. Always 200 while the process is serving.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"fuelopt-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe. 503 when the aircraft directory is empty.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let aircraft = state.directory().len();
    if aircraft == 0 {
        let status = HealthStatus::not_ready(service, version, "no aircraft loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, aircraft, state.assistant().is_some());
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelopt_lib::{AircraftDirectory, FsRouteLoader};

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert!(status.aircraft_loaded.is_none());
        assert!(status.assistant_configured.is_none());
    }

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::alive("fuelopt", "0.1.0")).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("aircraft_loaded"));
    }

    #[tokio::test]
    async fn test_health_ready_with_fixtures() {
        let (state, _guard) = crate::test_utils::fixture_state();
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_empty_directory() {
        let state = AppState::from_components(
            AircraftDirectory::default(),
            FsRouteLoader::new("/tmp"),
            None,
        );
        let response = health_ready(State(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
