use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One leg of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    /// Display label for the waypoint at the end of this leg.
    pub waypoint: String,
    /// Leg distance in kilometres.
    pub distance_km: f64,
    /// Signed wind component in km/h. Positive values are tailwind.
    pub wind_kmh: f64,
    /// Fractional fuel penalty (0.1 = 10% more fuel). May be negative.
    pub turbulence: f64,
}

impl RouteSegment {
    pub fn new(
        waypoint: impl Into<String>,
        distance_km: f64,
        wind_kmh: f64,
        turbulence: f64,
    ) -> Self {
        Self {
            waypoint: waypoint.into(),
            distance_km,
            wind_kmh,
            turbulence,
        }
    }

    /// Reject non-finite values and negative distances.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            (self.distance_km, "distance_km"),
            (self.wind_kmh, "wind_kmh"),
            (self.turbulence, "turbulence"),
        ];
        for (value, field) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidInput {
                    message: format!(
                        "{field} must be finite at waypoint '{}', got {value}",
                        self.waypoint
                    ),
                });
            }
        }

        if self.distance_km < 0.0 {
            return Err(Error::InvalidInput {
                message: format!(
                    "distance_km must be non-negative at waypoint '{}', got {}",
                    self.waypoint, self.distance_km
                ),
            });
        }

        Ok(())
    }
}
