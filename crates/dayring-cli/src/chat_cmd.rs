//! `dayring chat` command: one exchange with the task-breakdown assistant.

use anyhow::{Context, Result};

use dayring_core::assistant::{Assistant, TaskPlanner};

/// Run the chat command.
pub fn run_chat(planner: &TaskPlanner, message: &str) -> Result<()> {
    let reply = planner
        .reply(message)
        .context("the assistant could not answer")?;

    println!("{reply}");
    Ok(())
}
