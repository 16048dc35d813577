//! `estimate` subcommand: fuel for one aircraft on one route file.

use anyhow::{Context, Result};

use fuelopt_lib::{estimate, FsRouteLoader, RouteLoader};

use super::load_directory;
use crate::output::{render_estimate, OutputFormat};

pub fn handle_estimate(
    loader: &FsRouteLoader,
    aircraft: &str,
    route: &str,
    format: OutputFormat,
) -> Result<()> {
    let directory = load_directory(loader)?;
    let profile = directory.require(aircraft)?;
    let segments = loader
        .load(route)
        .with_context(|| format!("failed to load route {} from {}", route, loader.root().display()))?;
    let result = estimate(profile, &segments)?;

    println!("{}", render_estimate(aircraft, route, &result, format)?.trim_end());
    Ok(())
}
