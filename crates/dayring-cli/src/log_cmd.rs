//! `dayring log` commands: record and list completed activities.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};

use dayring_store::{ActivityLog, NewActivity};

use crate::LogCommands;

/// Dispatch a `LogCommands` variant to the appropriate handler.
pub fn run_log_command(command: LogCommands, log: &mut ActivityLog) -> Result<()> {
    match command {
        LogCommands::Add {
            name,
            start,
            end,
            category,
            color,
            tags,
        } => cmd_add(log, name, &start, &end, category, color, tags),
        LogCommands::List { date } => cmd_list(log, date.as_deref()),
        LogCommands::Remove { id } => cmd_remove(log, &id),
    }
}

fn parse_clock(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .with_context(|| format!("invalid time {raw:?} (expected HH:MM)"))
}

fn cmd_add(
    log: &mut ActivityLog,
    name: String,
    start: &str,
    end: &str,
    category: String,
    color: String,
    tags: Vec<String>,
) -> Result<()> {
    let record = log
        .append(
            NewActivity {
                name,
                category,
                color,
                start_time: parse_clock(start)?,
                end_time: parse_clock(end)?,
                tags,
            },
            Utc::now(),
        )
        .context("failed to record activity")?;

    println!("Recorded: {} ({})", record.name, record.id);
    println!(
        "  {} - {} ({} min{})",
        record.start_time.format("%H:%M"),
        record.end_time.format("%H:%M"),
        record.duration_minutes(),
        if record.is_overnight() { ", overnight" } else { "" },
    );
    if !record.tags.is_empty() {
        println!("  Tags: {}", record.tags.join(", "));
    }

    Ok(())
}

fn cmd_remove(log: &mut ActivityLog, id: &str) -> Result<()> {
    let removed = log.remove(id).context("failed to remove activity")?;
    if removed {
        println!("Activity {id} removed.");
    } else {
        println!("Activity {id} was not in the log; nothing to do.");
    }
    Ok(())
}

fn cmd_list(log: &ActivityLog, date: Option<&str>) -> Result<()> {
    let date = match date {
        Some(raw) => raw
            .parse::<NaiveDate>()
            .with_context(|| format!("invalid date {raw:?} (expected YYYY-MM-DD)"))?,
        None => Utc::now().date_naive(),
    };

    let records = log.for_date(date);
    if records.is_empty() {
        println!("No activities recorded on {date}.");
        return Ok(());
    }

    println!("Activities on {date}:");
    println!(
        "  {:<14} {:<13} {:<30} {:<10} {:>8}",
        "ID", "TIME", "NAME", "CATEGORY", "MINUTES"
    );
    println!("  {}", "-".repeat(80));

    let mut total_minutes = 0;
    for record in &records {
        let name_display = if record.name.len() > 28 {
            format!("{}...", &record.name[..25])
        } else {
            record.name.clone()
        };
        total_minutes += record.duration_minutes();
        println!(
            "  {:<14} {:<13} {:<30} {:<10} {:>8}",
            record.id,
            format!(
                "{}-{}",
                record.start_time.format("%H:%M"),
                record.end_time.format("%H:%M")
            ),
            name_display,
            record.category,
            record.duration_minutes(),
        );
    }

    println!();
    println!(
        "{} activities, {}h {}m total.",
        records.len(),
        total_minutes / 60,
        total_minutes % 60
    );

    Ok(())
}
