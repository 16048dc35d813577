//! Rendering of library results for the terminal.
//!
//! Every renderer returns a `String` so handlers decide where it goes and
//! tests can inspect it directly.

use clap::ValueEnum;
use serde::Serialize;

use fuelopt_lib::{AircraftProfile, OptimizationResult, RouteEstimate};

/// Output format for `estimate` and `optimize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON, same shape as the HTTP API.
    Json,
}

/// JSON shape of a single-route estimate.
#[derive(Debug, Serialize)]
pub struct EstimateReport<'a> {
    pub aircraft: &'a str,
    pub route_file: &'a str,
    pub fuel_estimate_kg: &'a RouteEstimate,
}

pub fn render_aircraft(aircraft: &[&AircraftProfile]) -> String {
    if aircraft.is_empty() {
        return "No aircraft available.\n".to_string();
    }

    let mut lines = vec![
        format!("Available aircraft ({}):", aircraft.len()),
        format!("{:<12} {:>18} {:>18}", "Type", "Cruise (km/h)", "Burn (kg/h)"),
    ];
    lines.extend(aircraft.iter().map(|profile| {
        format!(
            "{:<12} {:>18.1} {:>18.1}",
            profile.aircraft_type, profile.cruise_speed, profile.fuel_burn_per_hour
        )
    }));
    join_lines(lines)
}

pub fn render_estimate(
    aircraft: &str,
    route_file: &str,
    estimate: &RouteEstimate,
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        let report = EstimateReport {
            aircraft,
            route_file,
            fuel_estimate_kg: estimate,
        };
        return serde_json::to_string_pretty(&report);
    }

    let mut lines = vec![
        format!("Aircraft: {}", aircraft),
        format!("Route: {}", route_file),
        format!(
            "{:<16} {:>14} {:>12} {:>11} {:>12}",
            "Waypoint", "Distance (km)", "Wind (km/h)", "Turbulence", "Fuel (kg)"
        ),
    ];
    lines.extend(estimate.segments.iter().map(|segment| {
        format!(
            "{:<16} {:>14.2} {:>12.2} {:>11.2} {:>12.2}",
            segment.waypoint,
            segment.distance_km,
            segment.wind_kmh,
            segment.turbulence,
            segment.fuel_kg
        )
    }));
    lines.push(format!("Total fuel: {:.2} kg", estimate.total_fuel));
    Ok(join_lines(lines))
}

pub fn render_optimization(
    result: &OptimizationResult,
    format: OutputFormat,
) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return serde_json::to_string_pretty(result);
    }

    let mut lines = vec![format!("Aircraft: {}", result.aircraft), "Options:".to_string()];
    for option in &result.options {
        match (option.error(), option.total_fuel()) {
            (Some(error), _) => lines.push(format!(" - {}: ERROR: {}", option.route_file, error)),
            (None, Some(total)) => {
                lines.push(format!(" - {}: total_fuel_kg = {:.2}", option.route_file, total));
                for segment in option.segments() {
                    lines.push(format!("    * {}: {:.2} kg", segment.waypoint, segment.fuel_kg));
                }
            }
            (None, None) => {}
        }
    }

    lines.push(String::new());
    match (&result.best, result.best_total_fuel) {
        (Some(best), Some(total)) => {
            lines.push(format!("Best route: {} with {:.2} kg", best.route_file, total));
            lines.push(String::new());
            lines.push("Extra fuel vs best:".to_string());
            lines.extend(result.options.iter().filter_map(|option| {
                option.extra_vs_best().map(|extra| {
                    format!("  {}: extra_vs_best_kg = {:.2}", option.route_file, extra)
                })
            }));
        }
        _ => lines.push("No route could be evaluated.".to_string()),
    }

    Ok(join_lines(lines))
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelopt_lib::{optimize, AircraftDirectory, InMemoryRouteLoader, RouteSegment};

    fn directory() -> AircraftDirectory {
        AircraftDirectory::from_profiles([AircraftProfile::new("A320", 800.0, 2500.0).unwrap()])
            .unwrap()
    }

    fn comparison() -> OptimizationResult {
        let loader = InMemoryRouteLoader::new()
            .with_route("a.csv", vec![RouteSegment::new("Lagos", 400.0, 0.0, 0.0)])
            .with_route("b.csv", vec![RouteSegment::new("Lagos", 448.0, 0.0, 0.0)]);
        optimize("A320", &["a.csv", "b.csv", "gone.csv"], &directory(), &loader).unwrap()
    }

    #[test]
    fn renders_aircraft_table() {
        let directory = directory();
        let text = render_aircraft(&directory.aircraft_sorted());
        assert!(text.contains("Available aircraft (1):"));
        assert!(text.contains("A320"));
        assert!(text.contains("800.0"));
    }

    #[test]
    fn renders_empty_aircraft_list() {
        assert_eq!(render_aircraft(&[]), "No aircraft available.\n");
    }

    #[test]
    fn renders_optimization_text() {
        let text = render_optimization(&comparison(), OutputFormat::Text).unwrap();
        assert!(text.contains(" - a.csv: total_fuel_kg = 1250.00"));
        assert!(text.contains("    * Lagos: 1250.00 kg"));
        assert!(text.contains(" - gone.csv: ERROR: route gone.csv not found"));
        assert!(text.contains("Best route: a.csv with 1250.00 kg"));
        assert!(text.contains("  b.csv: extra_vs_best_kg = 150.00"));
    }

    #[test]
    fn renders_estimate_text_with_trailing_newline() {
        let directory = directory();
        let estimate = fuelopt_lib::estimate(
            directory.require("A320").unwrap(),
            &[RouteSegment::new("Lagos", 400.0, 0.0, 0.0)],
        )
        .unwrap();
        let text = render_estimate("A320", "a.csv", &estimate, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Aircraft: A320\nRoute: a.csv\n"));
        assert!(text.ends_with("Total fuel: 1250.00 kg\n"));
    }

    #[test]
    fn renders_no_best_when_every_route_fails() {
        let result =
            optimize("A320", &["gone.csv"], &directory(), &InMemoryRouteLoader::new()).unwrap();
        let text = render_optimization(&result, OutputFormat::Text).unwrap();
        assert!(text.ends_with("\nNo route could be evaluated.\n"));
    }

    #[test]
    fn renders_optimization_json() {
        let json = render_optimization(&comparison(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["best"]["route_file"], "a.csv");
        assert_eq!(value["options"][2]["error"], "route gone.csv not found");
    }
}
