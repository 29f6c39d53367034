#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use budget_tracker::{
    config::ConfigManager, domain::Catalog, BudgetTracker, FixedClock, JsonStorage,
};
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Noon UTC on the given day.
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Wednesday 17 July 2024, noon UTC.
pub fn reference_now() -> DateTime<Utc> {
    at(2024, 7, 17)
}

/// Creates a unique data directory that outlives the calling test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a tracker over `data_dir` pinned to `now`.
pub fn open_tracker(data_dir: &Path, now: DateTime<Utc>) -> BudgetTracker {
    let storage = JsonStorage::with_retention(data_dir.to_path_buf(), 3)
        .expect("create json storage backend");
    BudgetTracker::open(
        Box::new(storage),
        Catalog::builtin(),
        Arc::new(FixedClock::new(now)),
    )
}

/// Creates an isolated tracker and config manager backed by a fresh directory.
pub fn setup_test_env() -> (BudgetTracker, ConfigManager, PathBuf) {
    let base = temp_data_dir();
    let data_dir = base.join("ledger");
    let tracker = open_tracker(&data_dir, reference_now());
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (tracker, config_manager, data_dir)
}
