//! Shared infrastructure for the fuel optimizer HTTP service.
//!
//! - [`AppState`]: Aircraft directory, route loader and assistant shared by handlers
//! - [`health`]: Liveness/readiness probe handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON/text logging setup
//! - [`middleware`]: Request ID propagation and HTTP metrics
//! - [`assistant`]: Optional chat-completions client for free-form questions
//! - Request types with validation for each endpoint
//!
//! Handlers stay thin: all fuel logic lives in `fuelopt-lib`, this crate only
//! provides HTTP glue.
//!
//! # Testing Support
//!
//! The [`test_utils`] module builds an [`AppState`] over a scratch copy of the
//! CSV fixtures. Enable the `test-utils` feature to access it from dependent
//! crates.

#![deny(warnings)]

pub mod assistant;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use assistant::{AssistantClient, AssistantConfig, AssistantError};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_estimate, record_optimization, record_request_failed,
    record_route_failures, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_AIRCRAFT_NOT_FOUND, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_ROUTE_NOT_FOUND, PROBLEM_SERVICE_UNAVAILABLE,
    PROBLEM_UPSTREAM_ERROR,
};
pub use request::{AskAgentQuery, OptimizeRequest, UploadRouteRequest, Validate};
pub use state::{AppState, AppStateError};
