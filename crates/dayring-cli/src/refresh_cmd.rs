//! `dayring refresh` command: run the daily retention sweep.

use std::path::Path;

use anyhow::{Context, Result};

use dayring_core::retention;
use dayring_store::{ActivityLog, PlanStore};

/// Run the refresh command.
pub fn run_refresh(store: &mut PlanStore, log: &mut ActivityLog, marker: &Path) -> Result<()> {
    let outcome =
        retention::run_daily_sweep_now(store, log, marker).context("retention sweep failed")?;

    if !outcome.ran {
        println!("Already refreshed today; nothing to do.");
        return Ok(());
    }

    println!("Daily refresh complete.");
    println!("  Old completed daily plans pruned: {}", outcome.pruned_plans);
    println!("  Activity records cleared:         {}", outcome.cleared_activities);

    Ok(())
}
