//! Aircraft performance profile.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Aircraft performance attributes loaded from the aircraft directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    /// Unique aircraft type identifier (e.g. `A320`).
    pub aircraft_type: String,
    /// Cruise speed in km/h.
    pub cruise_speed: f64,
    /// Fuel burn rate in kg/h.
    pub fuel_burn_per_hour: f64,
}

impl AircraftProfile {
    /// Build and validate a profile.
    pub fn new(
        aircraft_type: impl Into<String>,
        cruise_speed: f64,
        fuel_burn_per_hour: f64,
    ) -> Result<Self> {
        let profile = Self {
            aircraft_type: aircraft_type.into().trim().to_string(),
            cruise_speed,
            fuel_burn_per_hour,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Validate aircraft attributes for correctness.
    pub fn validate(&self) -> Result<()> {
        if self.aircraft_type.trim().is_empty() {
            return Err(Error::AircraftDataValidation {
                message: "aircraft_type must not be empty".to_string(),
            });
        }

        let fields = [
            (self.cruise_speed, "cruise_speed"),
            (self.fuel_burn_per_hour, "fuel_burn_per_hour"),
        ];

        for (value, field) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::AircraftDataValidation {
                    message: format!(
                        "{field} must be a finite positive number for aircraft '{}'",
                        self.aircraft_type
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_identifier() {
        let profile = AircraftProfile::new(" A320 ", 800.0, 2500.0).expect("valid profile");
        assert_eq!(profile.aircraft_type, "A320");
    }

    #[test]
    fn rejects_zero_burn_rate() {
        let err = AircraftProfile::new("A320", 800.0, 0.0).expect_err("zero burn rate");
        match err {
            Error::AircraftDataValidation { message } => {
                assert!(message.contains("fuel_burn_per_hour"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_non_finite_speed() {
        assert!(AircraftProfile::new("A320", f64::NAN, 2500.0).is_err());
        assert!(AircraftProfile::new("A320", f64::INFINITY, 2500.0).is_err());
    }

    #[test]
    fn rejects_blank_identifier() {
        assert!(AircraftProfile::new("   ", 800.0, 2500.0).is_err());
    }
}
