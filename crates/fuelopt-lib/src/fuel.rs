//! Route fuel estimation.
//!
//! Each segment is evaluated independently with a linear model:
//!
//! ```text
//! effective_speed = max(cruise_speed + wind, speed_floor)
//! fuel            = distance / effective_speed * fuel_burn_per_hour * (1 + turbulence)
//! ```
//!
//! Segment fuel is reported rounded to two decimals. The route total is the
//! sum of the unrounded segment values, rounded once, so display rounding never
//! feeds back into the total.

use serde::{Deserialize, Serialize};

use crate::aircraft::AircraftProfile;
use crate::error::{Error, Result};
use crate::route::RouteSegment;

/// Minimum effective ground speed in km/h used when headwind is severe.
pub const SPEED_FLOOR_KMH: f64 = 100.0;

/// How negative turbulence factors are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurbulencePolicy {
    /// Negative turbulence reduces fuel ("calm bonus").
    #[default]
    AllowDiscount,
    /// Negative turbulence is rejected as invalid input.
    Reject,
    /// Negative turbulence is treated as zero.
    ClampToZero,
}

/// Estimator configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    /// Minimum effective speed in km/h.
    pub speed_floor: f64,
    pub turbulence_policy: TurbulencePolicy,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            speed_floor: SPEED_FLOOR_KMH,
            turbulence_policy: TurbulencePolicy::default(),
        }
    }
}

impl EstimatorConfig {
    /// Validate the estimator configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.speed_floor.is_finite() || self.speed_floor <= 0.0 {
            return Err(Error::InvalidInput {
                message: format!(
                    "speed_floor must be finite and positive, got {}",
                    self.speed_floor
                ),
            });
        }
        Ok(())
    }

    fn turbulence_factor(&self, segment: &RouteSegment) -> Result<f64> {
        if segment.turbulence >= 0.0 {
            return Ok(segment.turbulence);
        }
        // A discount of 100% or more would zero out or invert fuel mass.
        if segment.turbulence <= -1.0 {
            return Err(Error::InvalidInput {
                message: format!(
                    "turbulence must be greater than -1 at waypoint '{}', got {}",
                    segment.waypoint, segment.turbulence
                ),
            });
        }
        match self.turbulence_policy {
            TurbulencePolicy::AllowDiscount => Ok(segment.turbulence),
            TurbulencePolicy::ClampToZero => Ok(0.0),
            TurbulencePolicy::Reject => Err(Error::InvalidInput {
                message: format!(
                    "turbulence must be non-negative at waypoint '{}', got {}",
                    segment.waypoint, segment.turbulence
                ),
            }),
        }
    }
}

/// Fuel figures for a single segment, echoing its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub waypoint: String,
    pub distance_km: f64,
    pub wind_kmh: f64,
    pub turbulence: f64,
    /// Fuel burned on this segment in kg, rounded to two decimals.
    pub fuel_kg: f64,
}

/// Fuel estimate for a whole route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    /// Total fuel in kg: sum of unrounded segment fuel, rounded to two decimals.
    pub total_fuel: f64,
    pub segments: Vec<SegmentResult>,
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Magnitudes this large carry no fractional digits.
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Cruise speed adjusted by the signed wind component, clamped to `speed_floor`.
pub fn effective_speed(cruise_speed: f64, wind_kmh: f64, speed_floor: f64) -> f64 {
    (cruise_speed + wind_kmh).max(speed_floor)
}

/// Unrounded fuel in kg for a single segment.
pub fn segment_fuel(
    aircraft: &AircraftProfile,
    segment: &RouteSegment,
    config: &EstimatorConfig,
) -> Result<f64> {
    segment.validate()?;
    let turbulence = config.turbulence_factor(segment)?;

    let speed = effective_speed(aircraft.cruise_speed, segment.wind_kmh, config.speed_floor);
    let hours = segment.distance_km / speed;
    let base = hours * aircraft.fuel_burn_per_hour;

    let fuel = base * (1.0 + turbulence);
    if !fuel.is_finite() {
        return Err(Error::InvalidInput {
            message: format!(
                "fuel for waypoint '{}' is not a finite number",
                segment.waypoint
            ),
        });
    }
    Ok(fuel)
}

/// Estimate fuel for a route using the default configuration.
pub fn estimate(aircraft: &AircraftProfile, route: &[RouteSegment]) -> Result<RouteEstimate> {
    estimate_with_config(aircraft, route, &EstimatorConfig::default())
}

/// Estimate fuel for a route.
///
/// Fails with [`Error::InvalidInput`] on the first segment that has a negative
/// distance, a non-finite value, or turbulence rejected by the policy, and
/// when segment or total fuel overflows to a non-finite number.
pub fn estimate_with_config(
    aircraft: &AircraftProfile,
    route: &[RouteSegment],
    config: &EstimatorConfig,
) -> Result<RouteEstimate> {
    config.validate()?;
    aircraft
        .validate()
        .map_err(|err| Error::InvalidInput {
            message: err.to_string(),
        })?;

    let mut total = 0.0;
    let mut segments = Vec::with_capacity(route.len());

    for segment in route {
        let fuel = segment_fuel(aircraft, segment, config)?;
        total += fuel;
        segments.push(SegmentResult {
            waypoint: segment.waypoint.clone(),
            distance_km: segment.distance_km,
            wind_kmh: segment.wind_kmh,
            turbulence: segment.turbulence,
            fuel_kg: round2(fuel),
        });
    }

    if !total.is_finite() {
        return Err(Error::InvalidInput {
            message: "route fuel total is not a finite number".to_string(),
        });
    }

    Ok(RouteEstimate {
        total_fuel: round2(total),
        segments,
    })
}
