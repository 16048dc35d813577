//! Subcommand handlers.
//!
//! `main.rs` parses arguments and dispatches here; each handler loads what it
//! needs from the data directory and prints the rendered result.

pub mod aircraft;
pub mod estimate;
pub mod optimize;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use fuelopt_lib::{AircraftDirectory, FsRouteLoader};

/// Environment variable consulted when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "FUELOPT_DATA_DIR";

/// Fallback data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// `--data-dir`, else `FUELOPT_DATA_DIR`, else `./data`.
pub fn resolve_data_dir(arg: Option<&Path>) -> PathBuf {
    resolve_data_dir_with(arg, std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
}

fn resolve_data_dir_with(arg: Option<&Path>, env: Option<PathBuf>) -> PathBuf {
    arg.map(Path::to_path_buf)
        .or(env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Load `aircraft.csv` from the data directory.
pub fn load_directory(loader: &FsRouteLoader) -> Result<AircraftDirectory> {
    let path = loader.aircraft_path();
    AircraftDirectory::from_path(&path)
        .with_context(|| format!("failed to load aircraft data from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        let resolved = resolve_data_dir_with(
            Some(Path::new("/flag")),
            Some(PathBuf::from("/from-env")),
        );
        assert_eq!(resolved, PathBuf::from("/flag"));
    }

    #[test]
    fn env_used_without_flag() {
        let resolved = resolve_data_dir_with(None, Some(PathBuf::from("/from-env")));
        assert_eq!(resolved, PathBuf::from("/from-env"));
    }

    #[test]
    fn defaults_to_local_data_dir() {
        assert_eq!(resolve_data_dir_with(None, None), PathBuf::from("./data"));
        assert_eq!(
            resolve_data_dir_with(None, Some(PathBuf::new())),
            PathBuf::from("./data")
        );
    }
}
