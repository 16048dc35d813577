//! Common test utilities and fixture helpers.

use std::fs;
use std::path::{Path, PathBuf};

use fuelopt_lib::{AircraftDirectory, AircraftProfile};
use tempfile::TempDir;

/// Path to fixtures directory used by tests (aircraft and route CSVs).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Directory loaded from the `aircraft.csv` fixture.
#[allow(dead_code)]
pub fn fixture_directory() -> AircraftDirectory {
    AircraftDirectory::from_path(&fixtures_dir().join("aircraft.csv"))
        .expect("load fixture aircraft.csv")
}

/// The A320 profile used by most scenarios: 800 km/h, 2500 kg/h.
#[allow(dead_code)]
pub fn a320() -> AircraftProfile {
    AircraftProfile::new("A320", 800.0, 2500.0).expect("valid A320 profile")
}

/// Scratch data directory pre-populated with copies of the fixture CSVs.
#[allow(dead_code)]
pub struct DataDir {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl DataDir {
    pub fn with_fixtures() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().to_path_buf();
        for entry in fs::read_dir(fixtures_dir()).expect("read fixtures dir") {
            let entry = entry.expect("fixture entry");
            fs::copy(entry.path(), path.join(entry.file_name())).expect("copy fixture");
        }
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let target = self.path.join(name);
        fs::write(&target, content).expect("write scratch file");
        target
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
