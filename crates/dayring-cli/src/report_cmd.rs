//! `dayring report` command: review planned versus completed work.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use dayring_core::report::{self, ReportRange};
use dayring_store::{ActivityLog, Horizon, PlanStore};

/// Run the report command.
pub fn run_report(
    store: &PlanStore,
    log: &ActivityLog,
    range: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let today = Utc::now().date_naive();
    let range = resolve_range(range, from, to)?;

    let report = report::review(store.bucket(Horizon::Daily), log.all(), range, today);

    if report.from == report.to {
        println!("Review for {}", report.from);
    } else {
        println!("Review for {} to {}", report.from, report.to);
    }
    println!();

    println!(
        "Planned {} sub-tasks, completed {} activities.",
        report.planned_subtasks, report.completed_activities
    );
    println!(
        "Of those, {} matched the plan ({}% of planned work done).",
        report.matched_completions, report.completion_rate
    );
    println!();

    if report.categories.is_empty() {
        println!("No completed activities in this range.");
        if report.planned_subtasks > 0 {
            println!("Work was planned but nothing got logged; keep at it.");
        }
        return Ok(());
    }

    println!("{:<16} {:>6}", "CATEGORY", "COUNT");
    println!("{}", "-".repeat(23));
    for (category, count) in &report.categories {
        println!("{category:<16} {count:>6}");
    }
    if let Some(top) = report.top_category() {
        println!();
        println!("Most of the finished work was {top}.");
    }

    println!();
    if report.weekend_mostly_free() {
        println!("The weekend stayed mostly free; good balance.");
    } else {
        println!(
            "{} of {} completions landed on the weekend; consider more rest.",
            report.weekend_activities, report.completed_activities
        );
    }

    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse::<NaiveDate>()
        .with_context(|| format!("invalid date {raw:?} (expected YYYY-MM-DD)"))
}

fn resolve_range(range: &str, from: Option<&str>, to: Option<&str>) -> Result<ReportRange> {
    if let (Some(from), Some(to)) = (from, to) {
        let (from, to) = (parse_date(from)?, parse_date(to)?);
        if from > to {
            anyhow::bail!("range start {from} is after range end {to}");
        }
        return Ok(ReportRange::Custom { from, to });
    }

    match range {
        "today" => Ok(ReportRange::Today),
        "week" => Ok(ReportRange::LastWeek),
        "21days" => Ok(ReportRange::Last21Days),
        other => anyhow::bail!("invalid range {other:?} (expected today, week, or 21days)"),
    }
}
