//! Shared test utilities for dayring integration tests.
//!
//! Provides temp-dir-backed stores so each test gets fully isolated files,
//! plus small builders for the fixture records that almost every test needs.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use tempfile::TempDir;

use dayring_store::{ActivityLog, NewActivity, NewPlan, PlanStore};

/// Create a plan store backed by a fresh temporary directory.
///
/// Returns `(store, dir)`; keep the [`TempDir`] alive for the duration of
/// the test or the backing file disappears.
pub fn temp_store() -> (PlanStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let store = PlanStore::open(dayring_store::paths::plans_path(tmp.path()));
    (store, tmp)
}

/// Create an activity log backed by a fresh temporary directory.
pub fn temp_activity_log() -> (ActivityLog, TempDir) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let log = ActivityLog::open(dayring_store::paths::activity_path(tmp.path()));
    (log, tmp)
}

/// Create a plan store and activity log sharing one temporary data dir.
pub fn temp_stores() -> (PlanStore, ActivityLog, TempDir) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let store = PlanStore::open(dayring_store::paths::plans_path(tmp.path()));
    let log = ActivityLog::open(dayring_store::paths::activity_path(tmp.path()));
    (store, log, tmp)
}

/// Build a [`NewPlan`] with the given sub-task texts.
pub fn new_plan(title: &str, deadline: NaiveDate, subtasks: &[&str]) -> NewPlan {
    NewPlan {
        title: title.to_owned(),
        deadline,
        subtasks: subtasks.iter().map(|s| (*s).to_owned()).collect(),
    }
}

/// Build a [`NewActivity`] with defaults for the fields tests rarely vary.
pub fn new_activity(name: &str, start: NaiveTime, end: NaiveTime) -> NewActivity {
    NewActivity {
        name: name.to_owned(),
        category: "work".to_owned(),
        color: "#3b82f6".to_owned(),
        start_time: start,
        end_time: end,
        tags: Vec::new(),
    }
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Shorthand for a clock time.
pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time")
}

/// Shorthand for a UTC timestamp at noon on the given date.
pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid test timestamp")
}
