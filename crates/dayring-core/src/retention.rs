//! The once-per-day retention sweep.
//!
//! On the first run of a new calendar day the sweep clears yesterday's
//! activity log and prunes stale daily plans: completed plans older than 30
//! days are dropped, incomplete ones are kept regardless of age. The last
//! sweep date lives in a small marker file so running the sweep twice on
//! the same day is a no-op.

use std::path::Path;

use chrono::{Days, NaiveDate, Utc};
use tracing::info;

use dayring_store::{ActivityLog, PlanStore, StoreError};

/// How long completed daily plans are retained.
const RETENTION_DAYS: u64 = 30;

/// What a sweep run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// `false` when the sweep already ran today and nothing was touched.
    pub ran: bool,
    pub pruned_plans: usize,
    pub cleared_activities: usize,
}

/// Run the daily sweep if it has not run yet today.
pub fn run_daily_sweep(
    store: &mut PlanStore,
    log: &mut ActivityLog,
    marker_path: &Path,
    today: NaiveDate,
) -> Result<SweepOutcome, StoreError> {
    if last_sweep_date(marker_path) == Some(today) {
        return Ok(SweepOutcome::default());
    }

    let cutoff = today - Days::new(RETENTION_DAYS);
    let pruned_plans =
        store.retain_daily(|plan| !plan.completed || plan.created_at.date_naive() > cutoff)?;

    let cleared_activities = log.clear()?;

    write_marker(marker_path, today)?;
    info!(pruned_plans, cleared_activities, "daily retention sweep complete");

    Ok(SweepOutcome {
        ran: true,
        pruned_plans,
        cleared_activities,
    })
}

/// Convenience wrapper using the current date.
pub fn run_daily_sweep_now(
    store: &mut PlanStore,
    log: &mut ActivityLog,
    marker_path: &Path,
) -> Result<SweepOutcome, StoreError> {
    run_daily_sweep(store, log, marker_path, Utc::now().date_naive())
}

/// Read the marker file. Absent or unparseable markers mean the sweep has
/// never run (or the marker was damaged), which just makes the next run
/// unconditional.
fn last_sweep_date(marker_path: &Path) -> Option<NaiveDate> {
    let contents = std::fs::read_to_string(marker_path).ok()?;
    contents.trim().parse().ok()
}

fn write_marker(marker_path: &Path, today: NaiveDate) -> Result<(), StoreError> {
    if let Some(dir) = marker_path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Persistence {
            path: marker_path.to_owned(),
            source,
        })?;
    }
    std::fs::write(marker_path, format!("{today}\n")).map_err(|source| StoreError::Persistence {
        path: marker_path.to_owned(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
