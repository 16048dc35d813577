//! Route segments and route loading.
//!
//! - [`segment`] - A single leg of a route (distance, wind, turbulence)
//! - [`reader`] - CSV parsing for route files
//! - [`loader`] - The [`RouteLoader`] capability and its filesystem and
//!   in-memory implementations

pub mod loader;
pub mod reader;
pub mod segment;

pub use loader::{FsRouteLoader, InMemoryRouteLoader, RouteLoader, AIRCRAFT_FILE_NAME};
pub use reader::parse_route;
pub use segment::RouteSegment;
