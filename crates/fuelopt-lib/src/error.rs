use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the fuel optimizer library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested aircraft type is absent from the directory.
    #[error("aircraft {aircraft_type} not found")]
    AircraftNotFound { aircraft_type: String },

    /// Raised when aircraft data fails validation.
    #[error("invalid aircraft data: {message}")]
    AircraftDataValidation { message: String },

    /// Raised when duplicate aircraft types are encountered during directory load.
    #[error("duplicate aircraft type encountered: {aircraft_type}")]
    DuplicateAircraft { aircraft_type: String },

    /// Aircraft directory file could not be located.
    #[error("aircraft data not found at {path}")]
    AircraftDataNotFound { path: PathBuf },

    /// A candidate route could not be resolved by the loader.
    #[error("route {route} not found")]
    RouteNotFound { route: String },

    /// A candidate route was found but its contents could not be parsed.
    #[error("failed to parse route {route}: {message}")]
    RouteParse { route: String, message: String },

    /// Route name was rejected (path separators, traversal, wrong extension).
    #[error("invalid route name: {route}")]
    InvalidRouteName { route: String },

    /// Malformed segment or estimator configuration data.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
