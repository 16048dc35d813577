//! Fuel optimizer library entry points.
//!
//! This crate exposes the aircraft directory, route loading, the per-segment
//! fuel estimator, and the multi-route optimizer. Higher-level consumers (CLI,
//! HTTP service) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod aircraft;
mod columns;
pub mod error;
pub mod fuel;
pub mod optimizer;
pub mod route;

pub use aircraft::{AircraftDirectory, AircraftProfile};
pub use error::{Error, Result};
pub use fuel::{
    estimate, estimate_with_config, round2, EstimatorConfig, RouteEstimate, SegmentResult,
    TurbulencePolicy, SPEED_FLOOR_KMH,
};
pub use optimizer::{
    optimize, optimize_parallel, optimize_with, OptimizationResult, OptimizeOptions,
    RouteOutcome, RouteResult,
};
pub use route::{FsRouteLoader, InMemoryRouteLoader, RouteLoader, RouteSegment};
