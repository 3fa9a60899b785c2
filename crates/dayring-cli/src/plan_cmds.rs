//! CLI handlers for `dayring plan` subcommands.
//!
//! Implements:
//! - `dayring plan add <horizon> <title>`    -- create a plan
//! - `dayring plan list [horizon]`           -- sorted table with progress
//! - `dayring plan show <horizon> <id>`      -- detail view with sub-tasks
//! - `dayring plan edit <horizon> <id>`      -- edit (full-overwrite store op)
//! - `dayring plan delete <horizon> <id>`    -- delete (idempotent)

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};

use dayring_core::projection::{self, PlanView, UrgencyTier};
use dayring_store::{Horizon, NewPlan, PlanStore, PlanUpdate};

use crate::PlanCommands;
use crate::parse_horizon;

// -----------------------------------------------------------------------
// Public entry point
// -----------------------------------------------------------------------

/// Dispatch a `PlanCommands` variant to the appropriate handler.
pub fn run_plan_command(command: PlanCommands, store: &mut PlanStore) -> Result<()> {
    match command {
        PlanCommands::Add {
            horizon,
            title,
            deadline,
            subtasks,
        } => cmd_add(store, &horizon, title, deadline.as_deref(), subtasks),
        PlanCommands::List { horizon } => match horizon {
            Some(h) => cmd_list_one(store, &h),
            None => cmd_list_all(store),
        },
        PlanCommands::Show { horizon, plan_id } => cmd_show(store, &horizon, &plan_id),
        PlanCommands::Edit {
            horizon,
            plan_id,
            title,
            deadline,
            subtasks,
        } => cmd_edit(store, &horizon, &plan_id, title, deadline.as_deref(), subtasks),
        PlanCommands::Delete { horizon, plan_id } => cmd_delete(store, &horizon, &plan_id),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>()
        .with_context(|| format!("invalid date {raw:?} (expected YYYY-MM-DD)"))
}

// -----------------------------------------------------------------------
// dayring plan add
// -----------------------------------------------------------------------

fn cmd_add(
    store: &mut PlanStore,
    horizon_str: &str,
    title: String,
    deadline: Option<&str>,
    subtasks: Vec<String>,
) -> Result<()> {
    let horizon = parse_horizon(horizon_str)?;
    let now = Utc::now();
    let today = now.date_naive();

    // Year plans default to Dec 31 of the current year by convention; any
    // horizon accepts an explicit deadline.
    let deadline = match deadline {
        Some(raw) => parse_date(raw)?,
        None if horizon == Horizon::Year => NaiveDate::from_ymd_opt(today.year(), 12, 31)
            .expect("Dec 31 exists in every year"),
        None => today,
    };

    let plan = store
        .create(
            horizon,
            NewPlan {
                title,
                deadline,
                subtasks,
            },
            now,
        )
        .context("failed to create plan")?;

    println!("Plan created.");
    println!();
    println!("  ID:        {}", plan.id);
    println!("  Horizon:   {horizon}");
    println!("  Title:     {}", plan.title);
    println!("  Deadline:  {}", plan.deadline);
    println!("  Sub-tasks: {}", plan.subtasks.len());

    Ok(())
}

// -----------------------------------------------------------------------
// dayring plan list
// -----------------------------------------------------------------------

fn urgency_icon(urgency: UrgencyTier) -> &'static str {
    match urgency {
        UrgencyTier::Overdue => "!",
        UrgencyTier::DueToday => "*",
        UrgencyTier::DueSoon => ">",
        UrgencyTier::DueLater => ".",
    }
}

fn due_text(view: &PlanView) -> String {
    match view.urgency {
        UrgencyTier::Overdue => format!("overdue {}d", -view.days_remaining),
        UrgencyTier::DueToday => "due today".to_owned(),
        _ => format!("in {}d", view.days_remaining),
    }
}

fn print_view_table(views: &[PlanView]) {
    println!(
        "  {:<14} {:<30} {:<12} {:<12} {:>9} {:>5}",
        "ID", "TITLE", "DEADLINE", "DUE", "PROGRESS", "DONE"
    );
    println!("  {}", "-".repeat(88));

    for view in views {
        let title_display = if view.plan.title.len() > 28 {
            format!("{}...", &view.plan.title[..25])
        } else {
            view.plan.title.clone()
        };
        let progress = if view.plan.subtasks.is_empty() {
            "-".to_owned()
        } else {
            format!(
                "{}/{} {}%",
                view.plan.completed_subtasks(),
                view.plan.subtasks.len(),
                view.percent_complete
            )
        };
        println!(
            "{} {:<14} {:<30} {:<12} {:<12} {:>9} {:>5}",
            urgency_icon(view.urgency),
            view.plan.id,
            title_display,
            view.plan.deadline.to_string(),
            due_text(view),
            progress,
            if view.plan.completed { "[x]" } else { "[ ]" },
        );
    }
}

fn cmd_list_one(store: &PlanStore, horizon_str: &str) -> Result<()> {
    let horizon = parse_horizon(horizon_str)?;
    let today = Utc::now().date_naive();
    let views = projection::views(store.bucket(horizon), today);

    if views.is_empty() {
        println!("No {horizon} plans. Use `dayring plan add {horizon} <title>` to create one.");
        return Ok(());
    }

    println!("{horizon} plans:");
    print_view_table(&views);
    Ok(())
}

fn cmd_list_all(store: &PlanStore) -> Result<()> {
    let today = Utc::now().date_naive();

    if store.is_empty() {
        println!("No plans found. Use `dayring plan add <horizon> <title>` to create one.");
        return Ok(());
    }

    for horizon in Horizon::ALL {
        let views = projection::views(store.bucket(horizon), today);
        if views.is_empty() {
            continue;
        }
        println!("{horizon} plans:");
        print_view_table(&views);
        println!();
    }
    Ok(())
}

// -----------------------------------------------------------------------
// dayring plan show
// -----------------------------------------------------------------------

fn cmd_show(store: &PlanStore, horizon_str: &str, plan_id: &str) -> Result<()> {
    let horizon = parse_horizon(horizon_str)?;
    let today = Utc::now().date_naive();

    let plan = store
        .get(horizon, plan_id)
        .with_context(|| format!("plan {plan_id} not found in the {horizon} bucket"))?;

    let days = projection::days_remaining(plan, today);
    println!("Plan: {} ({})", plan.title, plan.id);
    println!("Horizon:  {horizon}");
    println!(
        "Deadline: {} ({}, {})",
        plan.deadline,
        projection::urgency(days),
        if days < 0 {
            format!("{}d ago", -days)
        } else {
            format!("{days}d left")
        }
    );
    println!("Created:  {}", plan.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("Done:     {}", if plan.completed { "yes" } else { "no" });

    if plan.subtasks.is_empty() {
        println!();
        println!("No sub-tasks.");
        return Ok(());
    }

    println!(
        "Progress: {}/{} ({}%)",
        plan.completed_subtasks(),
        plan.subtasks.len(),
        projection::completion_percentage(plan)
    );
    println!();
    println!("Sub-tasks:");
    for (i, subtask) in plan.subtasks.iter().enumerate() {
        println!(
            "  {}. [{}] {}",
            i + 1,
            if subtask.completed { "x" } else { " " },
            subtask.text
        );
    }

    Ok(())
}

// -----------------------------------------------------------------------
// dayring plan edit
// -----------------------------------------------------------------------

/// Edit a plan.
///
/// The store's update is a full overwrite, so this handler assembles the
/// complete replacement record: unspecified fields carry over from the
/// current plan, and a supplied `--subtask` list replaces the whole
/// checklist (as fresh, unchecked entries).
fn cmd_edit(
    store: &mut PlanStore,
    horizon_str: &str,
    plan_id: &str,
    title: Option<String>,
    deadline: Option<&str>,
    subtasks: Vec<String>,
) -> Result<()> {
    let horizon = parse_horizon(horizon_str)?;

    let current = store
        .get(horizon, plan_id)
        .with_context(|| format!("plan {plan_id} not found in the {horizon} bucket"))?
        .clone();

    let update = PlanUpdate {
        title: title.unwrap_or(current.title),
        deadline: match deadline {
            Some(raw) => parse_date(raw)?,
            None => current.deadline,
        },
        subtasks: if subtasks.is_empty() {
            current.subtasks
        } else {
            subtasks
                .into_iter()
                .map(dayring_store::Subtask::new)
                .collect()
        },
        completed: current.completed,
    };

    let plan = store
        .update(horizon, plan_id, update)
        .context("failed to update plan")?;

    println!("Plan {} updated.", plan.id);
    println!("  Title:     {}", plan.title);
    println!("  Deadline:  {}", plan.deadline);
    println!("  Sub-tasks: {}", plan.subtasks.len());

    Ok(())
}

// -----------------------------------------------------------------------
// dayring plan delete
// -----------------------------------------------------------------------

fn cmd_delete(store: &mut PlanStore, horizon_str: &str, plan_id: &str) -> Result<()> {
    let horizon = parse_horizon(horizon_str)?;
    let removed = store
        .delete(horizon, plan_id)
        .context("failed to delete plan")?;

    if removed {
        println!("Plan {plan_id} deleted.");
    } else {
        println!("Plan {plan_id} was not in the {horizon} bucket; nothing to do.");
    }
    Ok(())
}
