//! CSV parsing for route files.
//!
//! Expected header: `waypoint,distance_km,wind,turbulence`. Column names are
//! matched case-insensitively and a few synonyms are accepted.

use std::io::Read;

use csv::{ReaderBuilder, Trim};

use crate::columns::{available, ColumnMap};
use crate::error::{Error, Result};

use super::segment::RouteSegment;

const ROUTE_COLUMNS: &[(&str, &[&str])] = &[
    ("waypoint", &["waypoint", "name", "fix"]),
    ("distance_km", &["distance_km", "distance", "dist_km"]),
    ("wind_kmh", &["wind", "wind_kmh", "wind_component"]),
    ("turbulence", &["turbulence", "turbulence_factor"]),
];

/// Parse an ordered list of segments from CSV.
///
/// `route` is only used to label errors. Numeric range checks are left to the
/// estimator so that a parsed route always mirrors the file.
pub fn parse_route<R: Read>(route: &str, reader: R) -> Result<Vec<RouteSegment>> {
    let parse_error = |message: String| Error::RouteParse {
        route: route.to_string(),
        message,
    };

    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| parse_error(format!("failed to read headers: {err}")))?
        .clone();

    let columns = ColumnMap::resolve(&headers, ROUTE_COLUMNS).map_err(|missing| {
        parse_error(format!(
            "missing required columns: {}. Available: {}",
            missing.join(", "),
            available(&headers)
        ))
    })?;

    let mut segments = Vec::new();
    let mut row: u64 = 1;
    for result in csv_reader.records() {
        row += 1;
        let record = result.map_err(|e| parse_error(e.to_string()))?;

        let waypoint = columns.get(&record, "waypoint").unwrap_or_default();
        let number = |field: &str| -> Result<f64> {
            let raw = columns
                .get(&record, field)
                .ok_or_else(|| parse_error(format!("missing {field} at row {row}")))?;
            raw.parse::<f64>()
                .map_err(|e| parse_error(format!("invalid {field} '{raw}' at row {row}: {e}")))
        };

        segments.push(RouteSegment::new(
            waypoint,
            number("distance_km")?,
            number("wind_kmh")?,
            number("turbulence")?,
        ));
    }

    Ok(segments)
}
