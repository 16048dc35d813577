//! `aircraft` subcommand: list the aircraft directory.

use anyhow::Result;

use fuelopt_lib::FsRouteLoader;

use super::load_directory;
use crate::output::render_aircraft;

pub fn handle_list_aircraft(loader: &FsRouteLoader) -> Result<()> {
    let directory = load_directory(loader)?;
    print!("{}", render_aircraft(&directory.aircraft_sorted()));
    Ok(())
}
