//! Aircraft performance profiles and directory management.
//!
//! - [`profile`] - A single aircraft's cruise speed and fuel burn rate
//! - [`directory`] - Lookup table of profiles loaded from `aircraft.csv`
//!
//! # Example
//!
//! ```no_run
//! use fuelopt_lib::aircraft::AircraftDirectory;
//!
//! let directory = AircraftDirectory::from_path(std::path::Path::new("data/aircraft.csv")).unwrap();
//! let a320 = directory.get("A320").unwrap();
//! assert!(a320.cruise_speed > 0.0);
//! ```

pub mod directory;
pub mod profile;

pub use directory::AircraftDirectory;
pub use profile::AircraftProfile;
