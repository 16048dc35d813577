//! Aircraft directory loading and lookup.
//!
//! The directory is a plain value: callers load it once (or reload it on
//! their own schedule) and pass it into the estimator and optimizer.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::columns::{available, ColumnMap};
use crate::error::{Error, Result};

use super::profile::AircraftProfile;

const AIRCRAFT_COLUMNS: &[(&str, &[&str])] = &[
    ("aircraft_type", &["aircraft_type", "aircraft", "type", "name"]),
    (
        "cruise_speed",
        &["cruise_speed", "cruise_speed_kmh", "speed_kmh", "speed"],
    ),
    (
        "fuel_burn_per_hour",
        &[
            "fuel_burn_per_hour",
            "fuel_burn_kg_per_hour",
            "fuel_burn",
            "burn_rate",
        ],
    ),
];

/// Collection of aircraft profiles keyed by aircraft type.
#[derive(Debug, Clone, Default)]
pub struct AircraftDirectory {
    aircraft: HashMap<String, AircraftProfile>,
    source: Option<PathBuf>,
}

impl AircraftDirectory {
    /// Load an aircraft directory from a CSV file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::AircraftDataNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = fs::File::open(path)?;
        let mut directory = Self::from_reader(file)?;
        directory.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            aircraft = directory.len(),
            "loaded aircraft directory"
        );
        Ok(directory)
    }

    /// Load an aircraft directory from a reader (e.g., file or in-memory buffer).
    ///
    /// Expected header: `aircraft_type,cruise_speed,fuel_burn_per_hour`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::AircraftDataValidation {
                message: format!("failed to read aircraft.csv headers: {err}"),
            })?
            .clone();

        let columns = ColumnMap::resolve(&headers, AIRCRAFT_COLUMNS).map_err(|missing| {
            Error::AircraftDataValidation {
                message: format!(
                    "aircraft.csv missing required columns: {}. Available: {}",
                    missing.join(", "),
                    available(&headers)
                ),
            }
        })?;

        let mut directory = Self::default();

        let mut row: u64 = 1;
        for result in csv_reader.records() {
            row += 1;
            let record = result.map_err(|e| Error::AircraftDataValidation {
                message: e.to_string(),
            })?;

            let aircraft_type = columns.get(&record, "aircraft_type").unwrap_or_default();
            let number = |field: &str| -> Result<f64> {
                columns
                    .get(&record, field)
                    .ok_or_else(|| Error::AircraftDataValidation {
                        message: format!(
                            "missing {field} for aircraft '{aircraft_type}' at row {row}"
                        ),
                    })?
                    .parse::<f64>()
                    .map_err(|e| Error::AircraftDataValidation {
                        message: format!(
                            "invalid {field} for aircraft '{aircraft_type}' at row {row}: {e}"
                        ),
                    })
            };

            let profile = AircraftProfile::new(
                aircraft_type,
                number("cruise_speed")?,
                number("fuel_burn_per_hour")?,
            )?;
            directory.insert(profile)?;
        }

        Ok(directory)
    }

    /// Build a directory from already-constructed profiles.
    pub fn from_profiles<I>(profiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = AircraftProfile>,
    {
        let mut directory = Self::default();
        for profile in profiles {
            profile.validate()?;
            directory.insert(profile)?;
        }
        Ok(directory)
    }

    fn insert(&mut self, profile: AircraftProfile) -> Result<()> {
        let key = normalize_type(&profile.aircraft_type);
        if self.aircraft.contains_key(&key) {
            return Err(Error::DuplicateAircraft { aircraft_type: key });
        }
        self.aircraft.insert(key, profile);
        Ok(())
    }

    /// Get an aircraft by type (case-insensitive).
    pub fn get(&self, aircraft_type: &str) -> Option<&AircraftProfile> {
        self.aircraft.get(&normalize_type(aircraft_type))
    }

    /// Get an aircraft by type, failing with [`Error::AircraftNotFound`].
    pub fn require(&self, aircraft_type: &str) -> Result<&AircraftProfile> {
        self.get(aircraft_type)
            .ok_or_else(|| Error::AircraftNotFound {
                aircraft_type: aircraft_type.to_string(),
            })
    }

    /// Get all aircraft sorted by type.
    pub fn aircraft_sorted(&self) -> Vec<&AircraftProfile> {
        let mut aircraft: Vec<&AircraftProfile> = self.aircraft.values().collect();
        aircraft.sort_by(|a, b| a.aircraft_type.cmp(&b.aircraft_type));
        aircraft
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    /// Get the source path if the directory was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Normalize an aircraft type for case-insensitive lookup.
fn normalize_type(aircraft_type: &str) -> String {
    aircraft_type.trim().to_uppercase()
}
