mod chat_cmd;
mod config;
mod history_cmd;
mod log_cmd;
mod pace_cmd;
mod plan_cmds;
mod refresh_cmd;
mod report_cmd;
mod tui;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use dayring_core::{Action, CompletionPropagator, dispatch};
use dayring_store::{ActivityLog, Horizon, PlanStore};

use config::DayringConfig;

#[derive(Parser)]
#[command(name = "dayring", about = "Personal time tracking and day planning")]
struct Cli {
    /// Data directory (overrides DAYRING_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a dayring config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Plan management
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Mark a sub-task as done
    Check {
        /// Horizon: daily, week, month, or year
        horizon: String,
        /// Plan ID
        plan_id: String,
        /// Sub-task number as shown by `plan show` (1-based)
        index: usize,
    },
    /// Mark a sub-task as not done
    Uncheck {
        horizon: String,
        plan_id: String,
        index: usize,
    },
    /// Mark a plan as done (checks every sub-task)
    Done {
        horizon: String,
        plan_id: String,
    },
    /// Mark a plan as not done (unchecks every sub-task)
    Undone {
        horizon: String,
        plan_id: String,
    },
    /// Completed-activity log
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
    /// Review planned versus completed work over a range
    Report {
        /// Range: today, week, or 21days
        #[arg(long, default_value = "week", conflicts_with_all = ["from", "to"])]
        range: String,
        /// Custom range start (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Custom range end (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Show one day's plans and completed activities
    History {
        /// Date to look back at (YYYY-MM-DD)
        date: String,
    },
    /// Compare day progress against today's task progress
    Pace,
    /// Run the daily retention sweep
    Refresh,
    /// Ask the task-breakdown assistant
    Chat {
        /// Message for the assistant
        message: String,
    },
    /// Launch the interactive TUI dashboard
    Dashboard,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Add a plan
    Add {
        /// Horizon: daily, week, month, or year
        horizon: String,
        /// Plan title
        title: String,
        /// Deadline (YYYY-MM-DD); defaults to today, or Dec 31 for year plans
        #[arg(long)]
        deadline: Option<String>,
        /// Sub-task text (repeatable)
        #[arg(long = "subtask")]
        subtasks: Vec<String>,
    },
    /// List plans (all horizons, or one)
    List {
        /// Horizon to list (omit for all)
        horizon: Option<String>,
    },
    /// Show plan details
    Show { horizon: String, plan_id: String },
    /// Edit a plan (unspecified fields keep their current values)
    Edit {
        horizon: String,
        plan_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
        /// Replacement sub-task list (repeatable; omit to keep the current list)
        #[arg(long = "subtask")]
        subtasks: Vec<String>,
    },
    /// Delete a plan
    Delete { horizon: String, plan_id: String },
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// Record a completed activity
    Add {
        /// What was done
        name: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM); earlier than start means overnight
        #[arg(long)]
        end: String,
        /// Category label
        #[arg(long, default_value = "work")]
        category: String,
        /// Display color
        #[arg(long, default_value = "#3b82f6")]
        color: String,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List completed activities for a date
    List {
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove a recorded activity
    Remove {
        /// Activity ID as shown by `log list`
        id: String,
    },
}

/// Execute the `dayring init` command: write the config file.
fn cmd_init(data_dir: Option<&str>, force: bool) -> Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        storage: config::StorageSection {
            data_dir: data_dir.map(Into::into),
        },
        assistant: config::AssistantSection::default(),
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    let resolved = DayringConfig::resolve(data_dir)?;
    println!("  storage.data_dir = {}", resolved.data_dir.display());
    println!("  assistant.use_api = {}", cfg.assistant.use_api);
    println!();
    println!("Next: run `dayring plan add daily \"...\"` to create your first plan.");

    Ok(())
}

fn parse_horizon(raw: &str) -> Result<Horizon> {
    raw.parse::<Horizon>()
        .with_context(|| format!("invalid horizon: {raw}"))
}

/// Apply a toggle through the dispatch layer.
///
/// A persistence failure is non-fatal: the in-memory model stays the source
/// of truth for the rest of the session, so it is reported as a warning
/// rather than an error.
fn run_toggle(store: &mut PlanStore, action: Action, done_msg: &str) -> Result<()> {
    let propagator = CompletionPropagator::default();
    match dispatch(store, &propagator, action, Utc::now()) {
        Ok(_) => {
            println!("{done_msg}");
            Ok(())
        }
        Err(e) if e.is_persistence() => {
            tracing::error!(error = %e, "persist failed; keeping in-memory state");
            println!("{done_msg}");
            println!("warning: saving failed ({e}); changes are not on disk");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Run a sub-task toggle from its CLI arguments.
fn cmd_subtask_toggle(
    cli_data_dir: Option<&str>,
    horizon: &str,
    plan_id: &str,
    index: usize,
    completed: bool,
) -> Result<()> {
    let resolved = DayringConfig::resolve(cli_data_dir)?;
    let mut store = PlanStore::open(resolved.plans_path());
    let horizon = parse_horizon(horizon)?;
    if index == 0 {
        anyhow::bail!("sub-task numbers start at 1");
    }
    run_toggle(
        &mut store,
        Action::SetSubtask {
            horizon,
            id: plan_id.to_owned(),
            index: index - 1,
            completed,
        },
        &format!(
            "Sub-task {index} of plan {plan_id} {}.",
            if completed { "checked" } else { "unchecked" }
        ),
    )
}

/// Run a plan-level toggle from its CLI arguments.
fn cmd_plan_toggle(
    cli_data_dir: Option<&str>,
    horizon: &str,
    plan_id: &str,
    completed: bool,
) -> Result<()> {
    let resolved = DayringConfig::resolve(cli_data_dir)?;
    let mut store = PlanStore::open(resolved.plans_path());
    let horizon = parse_horizon(horizon)?;
    run_toggle(
        &mut store,
        Action::SetPlanCompletion {
            horizon,
            id: plan_id.to_owned(),
            completed,
        },
        &format!(
            "Plan {plan_id} marked {}.",
            if completed { "done" } else { "not done" }
        ),
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(data_dir, force)?;
        }
        Commands::Plan { command } => {
            let resolved = DayringConfig::resolve(data_dir)?;
            let mut store = PlanStore::open(resolved.plans_path());
            plan_cmds::run_plan_command(command, &mut store)?;
        }
        Commands::Check {
            horizon,
            plan_id,
            index,
        } => {
            cmd_subtask_toggle(data_dir, &horizon, &plan_id, index, true)?;
        }
        Commands::Uncheck {
            horizon,
            plan_id,
            index,
        } => {
            cmd_subtask_toggle(data_dir, &horizon, &plan_id, index, false)?;
        }
        Commands::Done { horizon, plan_id } => {
            cmd_plan_toggle(data_dir, &horizon, &plan_id, true)?;
        }
        Commands::Undone { horizon, plan_id } => {
            cmd_plan_toggle(data_dir, &horizon, &plan_id, false)?;
        }
        Commands::Log { command } => {
            let resolved = DayringConfig::resolve(data_dir)?;
            let mut log = ActivityLog::open(resolved.activity_path());
            log_cmd::run_log_command(command, &mut log)?;
        }
        Commands::Report { range, from, to } => {
            let resolved = DayringConfig::resolve(data_dir)?;
            let store = PlanStore::open(resolved.plans_path());
            let log = ActivityLog::open(resolved.activity_path());
            report_cmd::run_report(&store, &log, &range, from.as_deref(), to.as_deref())?;
        }
        Commands::History { date } => {
            let resolved = DayringConfig::resolve(data_dir)?;
            let store = PlanStore::open(resolved.plans_path());
            let log = ActivityLog::open(resolved.activity_path());
            history_cmd::run_history(&store, &log, &date)?;
        }
        Commands::Pace => {
            let resolved = DayringConfig::resolve(data_dir)?;
            let store = PlanStore::open(resolved.plans_path());
            pace_cmd::run_pace(&store)?;
        }
        Commands::Refresh => {
            let resolved = DayringConfig::resolve(data_dir)?;
            let mut store = PlanStore::open(resolved.plans_path());
            let mut log = ActivityLog::open(resolved.activity_path());
            refresh_cmd::run_refresh(&mut store, &mut log, &resolved.sweep_marker_path())?;
        }
        Commands::Chat { message } => {
            let resolved = DayringConfig::resolve(data_dir)?;
            chat_cmd::run_chat(&resolved.planner(), &message)?;
        }
        Commands::Dashboard => {
            let resolved = DayringConfig::resolve(data_dir)?;
            let store = PlanStore::open(resolved.plans_path());
            tui::run_dashboard(store)?;
        }
    }

    Ok(())
}
