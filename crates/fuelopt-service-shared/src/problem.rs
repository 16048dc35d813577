//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use fuelopt_lib::Error as LibError;

/// Problem type URI for unknown aircraft types.
pub const PROBLEM_AIRCRAFT_NOT_FOUND: &str = "/problems/aircraft-not-found";

/// Problem type URI for route files that do not exist.
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";

/// Problem type URI for invalid request parameters or route data.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for features that are not configured (e.g. the assistant).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// Problem type URI for failures of an upstream dependency.
pub const PROBLEM_UPSTREAM_ERROR: &str = "/problems/upstream-error";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use fuelopt_service_shared::{ProblemDetails, PROBLEM_AIRCRAFT_NOT_FOUND};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_AIRCRAFT_NOT_FOUND,
///     "Aircraft Not Found",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("Aircraft B747 not found")
/// .with_request_id("req-12345");
/// assert_eq!(problem.status, 404);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request ID of the failing call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 Bad Request for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 Not Found for an unknown aircraft type.
    pub fn aircraft_not_found(aircraft_type: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_AIRCRAFT_NOT_FOUND,
            "Aircraft Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("Aircraft {} not found", aircraft_type))
        .with_request_id(request_id)
    }

    /// 404 Not Found for a missing route file.
    pub fn route_not_found(route: &str, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("Route file {} not found", route))
        .with_request_id(request_id)
    }

    /// 500 Internal Server Error.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 503 Service Unavailable.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 502 Bad Gateway when an upstream call fails.
    pub fn upstream_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_UPSTREAM_ERROR,
            "Upstream Error",
            StatusCode::BAD_GATEWAY,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::AircraftNotFound { aircraft_type } => {
            ProblemDetails::aircraft_not_found(aircraft_type, request_id)
        }
        LibError::RouteNotFound { route } => ProblemDetails::route_not_found(route, request_id),
        LibError::RouteParse { .. }
        | LibError::InvalidRouteName { .. }
        | LibError::InvalidInput { .. } => {
            ProblemDetails::bad_request(error.to_string(), request_id)
        }
        LibError::AircraftDataNotFound { path } => ProblemDetails::service_unavailable(
            format!("Aircraft data not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_AIRCRAFT_NOT_FOUND,
            "Aircraft Not Found",
            StatusCode::NOT_FOUND,
        );
        assert_eq!(problem.type_uri, PROBLEM_AIRCRAFT_NOT_FOUND);
        assert_eq!(problem.status, 404);
        assert!(problem.detail.is_none());
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::bad_request("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"title\":\"Invalid Request\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_into_response_sets_problem_content_type() {
        let response = ProblemDetails::route_not_found("x.csv", "req-1").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_CONTENT_TYPE
        );
    }

    #[test]
    fn test_from_lib_error_aircraft_not_found() {
        let error = LibError::AircraftNotFound {
            aircraft_type: "B747".to_string(),
        };
        let problem = from_lib_error(&error, "req-lib");

        assert_eq!(problem.type_uri, PROBLEM_AIRCRAFT_NOT_FOUND);
        assert_eq!(problem.status, 404);
        assert_eq!(problem.detail.as_deref(), Some("Aircraft B747 not found"));
    }

    #[test]
    fn test_from_lib_error_route_errors() {
        let missing = LibError::RouteNotFound {
            route: "x.csv".to_string(),
        };
        assert_eq!(from_lib_error(&missing, "r").type_uri, PROBLEM_ROUTE_NOT_FOUND);

        let malformed = LibError::RouteParse {
            route: "x.csv".to_string(),
            message: "missing required columns: wind_kmh".to_string(),
        };
        let problem = from_lib_error(&malformed, "r");
        assert_eq!(problem.status, 400);
        assert!(problem.detail.unwrap().contains("wind_kmh"));
    }

    #[test]
    fn test_from_lib_error_fallback_is_internal() {
        let error = LibError::DuplicateAircraft {
            aircraft_type: "A320".to_string(),
        };
        assert_eq!(from_lib_error(&error, "r").status, 500);
    }
}
