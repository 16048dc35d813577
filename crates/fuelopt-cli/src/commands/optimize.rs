//! `optimize` subcommand: compare several route files for one aircraft.

use anyhow::{bail, Result};

use fuelopt_lib::{optimize_with, FsRouteLoader, OptimizeOptions};

use super::load_directory;
use crate::output::{render_optimization, OutputFormat};

/// Print the comparison. Fails after printing when no candidate could be
/// evaluated.
pub fn handle_optimize(
    loader: &FsRouteLoader,
    aircraft: &str,
    routes: &[String],
    parallel: bool,
    format: OutputFormat,
) -> Result<()> {
    let directory = load_directory(loader)?;
    let options = OptimizeOptions {
        parallel,
        ..OptimizeOptions::default()
    };
    let result = optimize_with(aircraft, routes, &directory, loader, &options)?;

    println!("{}", render_optimization(&result, format)?.trim_end());

    if result.best.is_none() {
        bail!("none of the {} candidate routes could be evaluated", routes.len());
    }
    Ok(())
}
