//! Fixtures for handler tests.
//!
//! Each state is backed by a fresh temporary copy of `docs/fixtures`, so
//! tests that upload routes or rewrite `aircraft.csv` stay isolated.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use tempfile::TempDir;

use crate::assistant::AssistantClient;
use crate::state::AppState;

pub const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures");

/// Route files shipped in the fixtures directory.
pub mod fixture_routes {
    /// 2350 kg for the A320.
    pub const BASELINE: &str = "routes.csv";
    /// 2000 kg for the A320, the cheapest fixture.
    pub const OPTION_B: &str = "routes_option_b.csv";
    /// 20375 kg for the A320 (strong headwind hits the speed floor).
    pub const OPTION_C: &str = "routes_option_c.csv";
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(FIXTURES_DIR)
}

/// Copy the fixtures into a new temporary directory.
///
/// # Panics
///
/// Panics if the fixtures cannot be copied; that is a test setup problem.
pub fn fixture_data_dir() -> TempDir {
    let temp = TempDir::new().unwrap_or_else(|e| panic!("failed to create temp dir: {}", e));
    let entries = fs::read_dir(fixtures_dir())
        .unwrap_or_else(|e| panic!("failed to read {}: {}", FIXTURES_DIR, e));
    for entry in entries.flatten() {
        let target = temp.path().join(entry.file_name());
        fs::copy(entry.path(), &target)
            .unwrap_or_else(|e| panic!("failed to copy fixture {:?}: {}", entry.path(), e));
    }
    temp
}

/// State over a scratch copy of the fixtures, without an assistant.
///
/// Keep the returned `TempDir` alive for as long as the state is used.
pub fn fixture_state() -> (AppState, TempDir) {
    fixture_state_with_assistant(None)
}

pub fn fixture_state_with_assistant(assistant: Option<AssistantClient>) -> (AppState, TempDir) {
    let data_dir = fixture_data_dir();
    let state = AppState::load(data_dir.path(), assistant)
        .unwrap_or_else(|e| panic!("failed to load fixture state: {}", e));
    (state, data_dir)
}

/// Unique request ID for tests.
pub fn test_request_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!("test-{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}
