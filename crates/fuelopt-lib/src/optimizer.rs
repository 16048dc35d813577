//! Multi-route comparison.
//!
//! [`optimize`] resolves every candidate route through a [`RouteLoader`],
//! estimates fuel for the ones that load, and picks the minimum-fuel option.
//! A route that fails to load or estimate is kept in the output with an error
//! marker instead of aborting its siblings; an unknown aircraft aborts the
//! whole call.

use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aircraft::{AircraftDirectory, AircraftProfile};
use crate::error::Result;
use crate::fuel::{estimate_with_config, round2, EstimatorConfig, RouteEstimate, SegmentResult};
use crate::route::RouteLoader;

/// Outcome of evaluating one candidate route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteOutcome {
    /// The route loaded and was estimated.
    Estimated {
        total_fuel: f64,
        segments: Vec<SegmentResult>,
        /// Fuel delta versus the best route, rounded to two decimals.
        extra_vs_best_kg: f64,
    },
    /// The route could not be loaded or evaluated.
    Failed { error: String },
}

/// One entry in the optimizer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Route identifier as supplied by the caller.
    pub route_file: String,
    #[serde(flatten)]
    pub outcome: RouteOutcome,
}

impl RouteResult {
    pub fn estimated(route_file: impl Into<String>, estimate: RouteEstimate) -> Self {
        Self {
            route_file: route_file.into(),
            outcome: RouteOutcome::Estimated {
                total_fuel: estimate.total_fuel,
                segments: estimate.segments,
                extra_vs_best_kg: 0.0,
            },
        }
    }

    pub fn failed(route_file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            route_file: route_file.into(),
            outcome: RouteOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Total fuel in kg, or `None` for failed routes.
    pub fn total_fuel(&self) -> Option<f64> {
        match &self.outcome {
            RouteOutcome::Estimated { total_fuel, .. } => Some(*total_fuel),
            RouteOutcome::Failed { .. } => None,
        }
    }

    /// Fuel delta versus the best route, or `None` for failed routes.
    pub fn extra_vs_best(&self) -> Option<f64> {
        match &self.outcome {
            RouteOutcome::Estimated {
                extra_vs_best_kg, ..
            } => Some(*extra_vs_best_kg),
            RouteOutcome::Failed { .. } => None,
        }
    }

    pub fn segments(&self) -> &[SegmentResult] {
        match &self.outcome {
            RouteOutcome::Estimated { segments, .. } => segments,
            RouteOutcome::Failed { .. } => &[],
        }
    }

    /// Error message for failed routes.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            RouteOutcome::Failed { error } => Some(error),
            RouteOutcome::Estimated { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, RouteOutcome::Failed { .. })
    }
}

/// Comparison of all candidate routes for one aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub aircraft: String,
    /// One entry per candidate, in input order, failures included.
    pub options: Vec<RouteResult>,
    /// Minimum-fuel route, or `None` when every candidate failed.
    pub best: Option<RouteResult>,
    pub best_total_fuel: Option<f64>,
}

impl OptimizationResult {
    /// Look up a candidate by its identifier.
    pub fn option(&self, route_file: &str) -> Option<&RouteResult> {
        self.options.iter().find(|o| o.route_file == route_file)
    }

    pub fn failed_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_error()).count()
    }
}

/// Options for [`optimize_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptimizeOptions {
    pub estimator: EstimatorConfig,
    /// Evaluate candidates on scoped threads. Output order is unchanged.
    pub parallel: bool,
}

/// Compare candidate routes sequentially with the default estimator.
pub fn optimize<S, L>(
    aircraft_type: &str,
    route_files: &[S],
    directory: &AircraftDirectory,
    loader: &L,
) -> Result<OptimizationResult>
where
    S: AsRef<str> + Sync,
    L: RouteLoader + ?Sized,
{
    optimize_with(
        aircraft_type,
        route_files,
        directory,
        loader,
        &OptimizeOptions::default(),
    )
}

/// Compare candidate routes, evaluating each on its own thread.
pub fn optimize_parallel<S, L>(
    aircraft_type: &str,
    route_files: &[S],
    directory: &AircraftDirectory,
    loader: &L,
) -> Result<OptimizationResult>
where
    S: AsRef<str> + Sync,
    L: RouteLoader + ?Sized,
{
    let options = OptimizeOptions {
        parallel: true,
        ..OptimizeOptions::default()
    };
    optimize_with(aircraft_type, route_files, directory, loader, &options)
}

/// Compare candidate routes for `aircraft_type`.
///
/// Fails with [`crate::Error::AircraftNotFound`] for an unknown aircraft and
/// [`crate::Error::InvalidInput`] for an invalid estimator configuration.
/// Per-route problems are reported inline in [`OptimizationResult::options`].
pub fn optimize_with<S, L>(
    aircraft_type: &str,
    route_files: &[S],
    directory: &AircraftDirectory,
    loader: &L,
    options: &OptimizeOptions,
) -> Result<OptimizationResult>
where
    S: AsRef<str> + Sync,
    L: RouteLoader + ?Sized,
{
    let aircraft = directory.require(aircraft_type)?;
    options.estimator.validate()?;

    debug!(
        aircraft = %aircraft.aircraft_type,
        candidates = route_files.len(),
        parallel = options.parallel,
        "comparing routes"
    );

    let mut results = if options.parallel && route_files.len() > 1 {
        evaluate_parallel(aircraft, route_files, loader, &options.estimator)
    } else {
        route_files
            .iter()
            .map(|route| evaluate_route(aircraft, route.as_ref(), loader, &options.estimator))
            .collect()
    };

    let best = select_best(&mut results);
    let best_total_fuel = best.as_ref().and_then(RouteResult::total_fuel);

    info!(
        aircraft = %aircraft.aircraft_type,
        candidates = results.len(),
        failed = results.iter().filter(|r| r.is_error()).count(),
        best = best.as_ref().map(|b| b.route_file.as_str()).unwrap_or("-"),
        "route comparison complete"
    );

    Ok(OptimizationResult {
        aircraft: aircraft_type.to_string(),
        options: results,
        best,
        best_total_fuel,
    })
}

fn evaluate_route<L: RouteLoader + ?Sized>(
    aircraft: &AircraftProfile,
    route_file: &str,
    loader: &L,
    config: &EstimatorConfig,
) -> RouteResult {
    let outcome = loader
        .load(route_file)
        .and_then(|segments| estimate_with_config(aircraft, &segments, config));

    match outcome {
        Ok(estimate) => RouteResult::estimated(route_file, estimate),
        Err(err) => {
            warn!(route = route_file, error = %err, "route excluded from comparison");
            RouteResult::failed(route_file, err.to_string())
        }
    }
}

fn evaluate_parallel<S, L>(
    aircraft: &AircraftProfile,
    route_files: &[S],
    loader: &L,
    config: &EstimatorConfig,
) -> Vec<RouteResult>
where
    S: AsRef<str> + Sync,
    L: RouteLoader + ?Sized,
{
    thread::scope(|scope| {
        let handles: Vec<_> = route_files
            .iter()
            .map(|route| {
                let route = route.as_ref();
                (
                    route,
                    scope.spawn(move || evaluate_route(aircraft, route, loader, config)),
                )
            })
            .collect();

        // Joining in spawn order keeps the output in input order.
        handles
            .into_iter()
            .map(|(route, handle)| {
                handle
                    .join()
                    .unwrap_or_else(|_| RouteResult::failed(route, "route evaluation panicked"))
            })
            .collect()
    })
}

/// Pick the first minimum-fuel success and fill in every success's delta.
fn select_best(results: &mut [RouteResult]) -> Option<RouteResult> {
    let mut best: Option<(usize, f64)> = None;
    for (index, result) in results.iter().enumerate() {
        if let Some(total) = result.total_fuel() {
            match best {
                Some((_, best_total)) if total >= best_total => {}
                _ => best = Some((index, total)),
            }
        }
    }

    let (best_index, best_total) = best?;
    for result in results.iter_mut() {
        if let RouteOutcome::Estimated {
            total_fuel,
            extra_vs_best_kg,
            ..
        } = &mut result.outcome
        {
            *extra_vs_best_kg = round2(*total_fuel - best_total);
        }
    }

    Some(results[best_index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimated(route: &str, total: f64) -> RouteResult {
        RouteResult::estimated(
            route,
            RouteEstimate {
                total_fuel: total,
                segments: Vec::new(),
            },
        )
    }

    #[test]
    fn select_best_prefers_first_seen_on_ties() {
        let mut results = vec![
            RouteResult::failed("missing.csv", "route missing.csv not found"),
            estimated("a.csv", 1400.0),
            estimated("b.csv", 1250.0),
            estimated("c.csv", 1250.0),
        ];

        let best = select_best(&mut results).expect("a best route");
        assert_eq!(best.route_file, "b.csv");
        assert_eq!(best.extra_vs_best(), Some(0.0));
        assert_eq!(results[1].extra_vs_best(), Some(150.0));
        assert_eq!(results[3].extra_vs_best(), Some(0.0));
        assert_eq!(results[0].extra_vs_best(), None);
    }

    #[test]
    fn select_best_is_none_when_everything_failed() {
        let mut results = vec![
            RouteResult::failed("a.csv", "boom"),
            RouteResult::failed("b.csv", "boom"),
        ];
        assert!(select_best(&mut results).is_none());
    }

    #[test]
    fn failed_result_serializes_with_error_only() {
        let json = serde_json::to_value(RouteResult::failed("x.csv", "route x.csv not found"))
            .expect("serialize");
        assert_eq!(json["route_file"], "x.csv");
        assert_eq!(json["error"], "route x.csv not found");
        assert!(json.get("total_fuel").is_none());
    }

    #[test]
    fn estimated_result_serializes_flat() {
        let json = serde_json::to_value(estimated("a.csv", 1250.0)).expect("serialize");
        assert_eq!(json["route_file"], "a.csv");
        assert_eq!(json["total_fuel"], 1250.0);
        assert_eq!(json["extra_vs_best_kg"], 0.0);
        assert!(json.get("error").is_none());
    }
}
