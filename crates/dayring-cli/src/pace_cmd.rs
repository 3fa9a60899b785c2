//! `dayring pace` command: how the day is going versus the plan.

use anyhow::Result;
use chrono::Local;

use dayring_core::pace;
use dayring_store::{Horizon, PlanStore};

/// Run the pace command against the local wall clock.
pub fn run_pace(store: &PlanStore) -> Result<()> {
    let now = Local::now().time();
    let day = pace::day_progress_percent(now);
    let tasks = pace::subtask_completion_percent(store.bucket(Horizon::Daily));

    println!("Day progress:  {day}%");
    println!("Task progress: {tasks}%");
    println!();

    if store.bucket(Horizon::Daily).is_empty() {
        println!("No daily plans yet. Add one with `dayring plan add daily <title>`.");
        return Ok(());
    }

    if pace::should_remind(day, tasks) {
        println!("The day is running ahead of your task list.");
        println!("  - Start with whatever is closest to its deadline");
        println!("  - Shrink or defer what will not fit today");
    } else {
        println!("You are keeping pace. Carry on.");
    }

    Ok(())
}
