//! Route loading capability.
//!
//! The optimizer resolves each candidate route through a [`RouteLoader`], so
//! it does not care whether routes live on disk, in an upload buffer, or
//! somewhere remote.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};

use super::reader::parse_route;
use super::segment::RouteSegment;

/// File name of the aircraft directory inside a data directory.
pub const AIRCRAFT_FILE_NAME: &str = "aircraft.csv";

/// Resolves a route identifier into its ordered segments.
pub trait RouteLoader: Send + Sync {
    /// Load the segments for `route`.
    ///
    /// Fails with [`Error::RouteNotFound`] when the route does not exist and
    /// [`Error::RouteParse`] when it exists but is malformed.
    fn load(&self, route: &str) -> Result<Vec<RouteSegment>>;
}

/// Loads route CSV files from a single data directory.
#[derive(Debug, Clone)]
pub struct FsRouteLoader {
    root: PathBuf,
}

impl FsRouteLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory that route files are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the aircraft directory file in this data directory.
    pub fn aircraft_path(&self) -> PathBuf {
        self.root.join(AIRCRAFT_FILE_NAME)
    }

    /// Resolve a route name to a path inside the data directory.
    ///
    /// Names containing path separators or parent references are rejected so
    /// that callers cannot escape the data directory.
    pub fn resolve(&self, route: &str) -> Result<PathBuf> {
        validate_route_name(route)?;
        Ok(self.root.join(route))
    }

    /// List route files (`*.csv`, excluding the aircraft file), sorted by name.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut routes = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_csv(&name) && !name.eq_ignore_ascii_case(AIRCRAFT_FILE_NAME) {
                routes.push(name);
            }
        }
        routes.sort();
        Ok(routes)
    }

    /// Validate and persist an uploaded route file.
    ///
    /// The name must be a bare `.csv` file name other than the aircraft file,
    /// and the content must parse as a route. Existing files are overwritten.
    pub fn store(&self, route: &str, content: &[u8]) -> Result<PathBuf> {
        validate_route_name(route)?;
        if !is_csv(route) || route.eq_ignore_ascii_case(AIRCRAFT_FILE_NAME) {
            return Err(Error::InvalidRouteName {
                route: route.to_string(),
            });
        }

        let segments = parse_route(route, content)?;
        for segment in &segments {
            segment.validate()?;
        }

        fs::create_dir_all(&self.root)?;
        let path = self.root.join(route);
        fs::write(&path, content)?;
        info!(
            route = route,
            segments = segments.len(),
            path = %path.display(),
            "stored route file"
        );
        Ok(path)
    }
}

impl RouteLoader for FsRouteLoader {
    fn load(&self, route: &str) -> Result<Vec<RouteSegment>> {
        let path = self.resolve(route)?;
        if !path.is_file() {
            return Err(Error::RouteNotFound {
                route: route.to_string(),
            });
        }

        let file = fs::File::open(&path)?;
        let segments = parse_route(route, file)?;
        debug!(route = route, segments = segments.len(), "loaded route");
        Ok(segments)
    }
}

/// Routes held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRouteLoader {
    routes: HashMap<String, Vec<RouteSegment>>,
}

impl InMemoryRouteLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a route and return the loader for chaining.
    pub fn with_route(mut self, route: impl Into<String>, segments: Vec<RouteSegment>) -> Self {
        self.insert(route, segments);
        self
    }

    pub fn insert(&mut self, route: impl Into<String>, segments: Vec<RouteSegment>) {
        self.routes.insert(route.into(), segments);
    }
}

impl RouteLoader for InMemoryRouteLoader {
    fn load(&self, route: &str) -> Result<Vec<RouteSegment>> {
        self.routes
            .get(route)
            .cloned()
            .ok_or_else(|| Error::RouteNotFound {
                route: route.to_string(),
            })
    }
}

fn validate_route_name(route: &str) -> Result<()> {
    let trimmed = route.trim();
    let invalid = trimmed.is_empty()
        || trimmed != route
        || route.contains(['/', '\\'])
        || route == "."
        || route == "..";
    if invalid {
        return Err(Error::InvalidRouteName {
            route: route.to_string(),
        });
    }
    Ok(())
}

fn is_csv(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
