//! The conversational task-breakdown assistant.
//!
//! The assistant is a collaborator behind a single-method trait: text in,
//! reply out. Two implementations exist -- a scripted keyword-matched one
//! that always works offline, and a remote chat-completions client -- and
//! [`TaskPlanner`] routes between them by input complexity, falling back to
//! the scripted path whenever the remote one fails. Nothing in this module
//! touches the plan store.

pub mod remote;
pub mod scripted;

use thiserror::Error;
use tracing::warn;

pub use remote::{RemoteAssistant, RemoteConfig};
pub use scripted::ScriptedAssistant;

/// Hard cap on user input length, matching the chat input limit.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Errors that can occur during an assistant exchange.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error("message exceeds {MAX_MESSAGE_CHARS} characters ({len})")]
    MessageTooLong { len: usize },

    #[error("no API key configured for the remote assistant")]
    MissingApiKey,

    #[error("assistant endpoint returned HTTP {0}")]
    Status(u16),

    #[error("failed to reach assistant endpoint: {0}")]
    Transport(String),

    #[error("assistant response had no reply content")]
    MalformedResponse,

    #[error("request failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<AssistantError>,
    },
}

/// The `(user text) -> reply text` collaborator contract.
pub trait Assistant {
    fn reply(&self, user_text: &str) -> Result<String, AssistantError>;
}

/// Validate raw user input: trimmed, non-empty, within the length cap.
pub fn validate_message(raw: &str) -> Result<&str, AssistantError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(AssistantError::EmptyMessage);
    }
    if text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AssistantError::MessageTooLong {
            len: text.chars().count(),
        });
    }
    Ok(text)
}

// ---------------------------------------------------------------------------
// Input routing
// ---------------------------------------------------------------------------

/// Which backend should handle a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Scripted,
    Remote,
}

const SIMPLE_KEYWORDS: &[&str] = &[
    "help", "how do i use", "usage", "tutorial", "hello", "hi ", "hey", "good morning",
    "good evening", "goodbye", "bye", "see you", "thank", "thanks",
];

const TASK_KEYWORDS: &[&str] = &[
    "task", "plan", "schedule", "break down", "step", "finish", "complete", "prepare",
    "study", "review", "project", "report", "paper", "essay", "exam", "assignment",
    "meeting", "presentation",
];

const DATE_KEYWORDS: &[&str] = &[
    "today", "tomorrow", "this week", "next week", "this month", "next month", "deadline",
    "due", "by the end of",
];

/// Score how complex a message is. One point each for: a multi-part request,
/// task vocabulary, length, an explicit question, and a date reference.
pub fn complexity_score(text: &str) -> u8 {
    let lower = text.to_lowercase();
    let mut score = 0;

    if lower.contains(',') || lower.contains(';') || lower.contains(" and ") {
        score += 1;
    }
    if TASK_KEYWORDS.iter().any(|k| lower.contains(k)) {
        score += 1;
    }
    if text.chars().count() > 30 {
        score += 1;
    }
    if lower.contains('?') {
        score += 1;
    }
    if DATE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        score += 1;
    }

    score
}

/// Whether the message is a simple greeting/help/thanks exchange that the
/// scripted assistant answers well regardless of score.
pub fn is_simple_message(text: &str) -> bool {
    let lower = text.to_lowercase();
    SIMPLE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Decide the backend for a message. Remote handling requires a configured
/// remote, a complexity score of at least two, and a non-trivial message.
pub fn route(text: &str, remote_available: bool) -> Route {
    if remote_available && complexity_score(text) >= 2 && !is_simple_message(text) {
        Route::Remote
    } else {
        Route::Scripted
    }
}

/// Extra instruction appended to remote prompts so replies come back as
/// concrete numbered steps.
fn enhance_for_breakdown(text: &str) -> String {
    format!(
        "{text}\n\nBreak this goal into concrete, actionable steps. \
         Give each step a rough time estimate and a priority, and use a \
         clear numbered structure."
    )
}

// ---------------------------------------------------------------------------
// Routing facade
// ---------------------------------------------------------------------------

/// The routing assistant the UI layers talk to.
pub struct TaskPlanner {
    scripted: ScriptedAssistant,
    remote: Option<RemoteAssistant>,
}

impl TaskPlanner {
    /// A planner with no remote backend: everything is answered locally.
    pub fn offline() -> Self {
        Self {
            scripted: ScriptedAssistant,
            remote: None,
        }
    }

    /// A planner that routes complex messages to a remote backend.
    pub fn with_remote(remote: RemoteAssistant) -> Self {
        Self {
            scripted: ScriptedAssistant,
            remote: Some(remote),
        }
    }
}

impl Assistant for TaskPlanner {
    /// Answer a message, never failing on the remote path: any remote error
    /// is logged and absorbed by the scripted fallback. Only input
    /// validation errors reach the caller.
    fn reply(&self, user_text: &str) -> Result<String, AssistantError> {
        let text = validate_message(user_text)?;

        match (route(text, self.remote.is_some()), &self.remote) {
            (Route::Remote, Some(remote)) => {
                match remote.reply(&enhance_for_breakdown(text)) {
                    Ok(reply) if !reply.trim().is_empty() => Ok(reply),
                    Ok(_) => {
                        warn!("remote assistant returned an empty reply; using scripted fallback");
                        self.scripted.reply(text)
                    }
                    Err(e) => {
                        warn!(error = %e, "remote assistant failed; using scripted fallback");
                        self.scripted.reply(text)
                    }
                }
            }
            _ => self.scripted.reply(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_empty_and_oversized() {
        assert!(matches!(
            validate_message("   "),
            Err(AssistantError::EmptyMessage)
        ));

        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(matches!(
            validate_message(&long),
            Err(AssistantError::MessageTooLong { .. })
        ));

        assert_eq!(validate_message("  prepare the exam  ").unwrap(), "prepare the exam");
    }

    #[test]
    fn greetings_route_to_scripted() {
        assert_eq!(route("hello there", true), Route::Scripted);
        assert_eq!(route("thanks a lot!", true), Route::Scripted);
    }

    #[test]
    fn complex_requests_route_to_remote_when_available() {
        let msg = "I need to prepare the quarterly report and plan the team \
                   offsite by next week, how should I split the work?";
        assert!(complexity_score(msg) >= 2);
        assert_eq!(route(msg, true), Route::Remote);
        assert_eq!(route(msg, false), Route::Scripted);
    }

    #[test]
    fn short_vague_requests_stay_scripted() {
        assert_eq!(route("do stuff", true), Route::Scripted);
    }

    #[test]
    fn offline_planner_always_answers() {
        let planner = TaskPlanner::offline();
        let reply = planner.reply("help").unwrap();
        assert!(!reply.is_empty());
    }

    #[test]
    fn offline_planner_surfaces_validation_errors() {
        let planner = TaskPlanner::offline();
        assert!(matches!(
            planner.reply(""),
            Err(AssistantError::EmptyMessage)
        ));
    }
}
