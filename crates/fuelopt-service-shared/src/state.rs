//! Application state shared by HTTP handlers.
//!
//! The aircraft directory is loaded once at startup and only replaced through
//! an explicit [`AppState::reload_aircraft`] call; handlers take a snapshot
//! (`Arc<AircraftDirectory>`) and pass it into the library.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use fuelopt_lib::{AircraftDirectory, Error as LibError, FsRouteLoader};

use crate::assistant::AssistantClient;

/// Error during application state initialization.
#[derive(Debug, Error)]
pub enum AppStateError {
    /// The data directory does not exist.
    #[error("data directory not found: {0}")]
    DataDirNotFound(String),

    /// Failed to load `aircraft.csv`.
    #[error("failed to load aircraft data: {0}")]
    AircraftLoad(#[from] LibError),
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (using `Arc` internally); share it via axum's `State`
/// extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    directory: RwLock<Arc<AircraftDirectory>>,
    loader: FsRouteLoader,
    assistant: Option<AssistantClient>,
}

impl AppState {
    /// Load application state from a data directory.
    ///
    /// Reads `{data_dir}/aircraft.csv`; route files are resolved lazily per
    /// request from the same directory.
    pub fn load(
        data_dir: impl AsRef<Path>,
        assistant: Option<AssistantClient>,
    ) -> Result<Self, AppStateError> {
        let data_dir = data_dir.as_ref();
        if !data_dir.is_dir() {
            return Err(AppStateError::DataDirNotFound(
                data_dir.display().to_string(),
            ));
        }

        let loader = FsRouteLoader::new(data_dir);
        let aircraft_path = loader.aircraft_path();
        tracing::info!(path = %aircraft_path.display(), "loading aircraft directory");
        let directory = AircraftDirectory::from_path(&aircraft_path)?;
        tracing::info!(aircraft = directory.len(), "aircraft directory loaded");

        Ok(Self::from_components(directory, loader, assistant))
    }

    /// Create application state from pre-loaded components.
    pub fn from_components(
        directory: AircraftDirectory,
        loader: FsRouteLoader,
        assistant: Option<AssistantClient>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                directory: RwLock::new(Arc::new(directory)),
                loader,
                assistant,
            }),
        }
    }

    /// Snapshot of the current aircraft directory.
    pub fn directory(&self) -> Arc<AircraftDirectory> {
        self.inner
            .directory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-read `aircraft.csv` and swap it in.
    ///
    /// On failure the previous directory stays in place.
    pub fn reload_aircraft(&self) -> Result<Arc<AircraftDirectory>, LibError> {
        let fresh = Arc::new(AircraftDirectory::from_path(
            &self.inner.loader.aircraft_path(),
        )?);
        *self
            .inner
            .directory
            .write()
            .unwrap_or_else(PoisonError::into_inner) = fresh.clone();
        tracing::info!(aircraft = fresh.len(), "aircraft directory reloaded");
        Ok(fresh)
    }

    pub fn loader(&self) -> &FsRouteLoader {
        &self.inner.loader
    }

    pub fn data_dir(&self) -> PathBuf {
        self.inner.loader.root().to_path_buf()
    }

    pub fn assistant(&self) -> Option<&AssistantClient> {
        self.inner.assistant.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("aircraft_count", &self.directory().len())
            .field("data_dir", &self.inner.loader.root())
            .field("assistant", &self.inner.assistant.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_aircraft(dir: &Path, rows: &str) {
        fs::write(
            dir.join("aircraft.csv"),
            format!("aircraft_type,cruise_speed,fuel_burn_per_hour\n{rows}"),
        )
        .unwrap();
    }

    #[test]
    fn test_app_state_load_missing_dir() {
        match AppState::load("/nonexistent/fuelopt/data", None) {
            Err(AppStateError::DataDirNotFound(path)) => assert!(path.contains("nonexistent")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_app_state_load_missing_aircraft_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = AppState::load(temp.path(), None).unwrap_err();
        assert!(matches!(err, AppStateError::AircraftLoad(_)));
    }

    #[test]
    fn test_reload_replaces_directory() {
        let temp = tempfile::tempdir().unwrap();
        write_aircraft(temp.path(), "A320,800,2500\n");
        let state = AppState::load(temp.path(), None).unwrap();
        let before = state.directory();
        assert_eq!(before.len(), 1);

        write_aircraft(temp.path(), "A320,800,2500\nB737,780,2600\n");
        state.reload_aircraft().unwrap();

        assert_eq!(state.directory().len(), 2);
        // Snapshots taken earlier are unaffected.
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_failed_reload_keeps_previous_directory() {
        let temp = tempfile::tempdir().unwrap();
        write_aircraft(temp.path(), "A320,800,2500\n");
        let state = AppState::load(temp.path(), None).unwrap();

        write_aircraft(temp.path(), "A320,-1,2500\n");
        assert!(state.reload_aircraft().is_err());
        assert!(state.directory().get("A320").is_some());
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_components(
            AircraftDirectory::default(),
            FsRouteLoader::new("/tmp"),
            None,
        );
        let debug = format!("{:?}", state);
        assert!(debug.contains("AppState"));
        assert!(debug.contains("aircraft_count"));
    }
}
