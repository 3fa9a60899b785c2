use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Planning horizon a plan belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Daily,
    Week,
    Month,
    Year,
}

impl Horizon {
    /// All horizons, in display order.
    pub const ALL: [Horizon; 4] = [
        Horizon::Daily,
        Horizon::Week,
        Horizon::Month,
        Horizon::Year,
    ];
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        f.write_str(s)
    }
}

impl FromStr for Horizon {
    type Err = HorizonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" | "day" => Ok(Self::Daily),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(HorizonParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Horizon`] string.
#[derive(Debug, Clone)]
pub struct HorizonParseError(pub String);

impl fmt::Display for HorizonParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid horizon: {:?} (expected daily, week, month, or year)",
            self.0
        )
    }
}

impl std::error::Error for HorizonParseError {}

// ---------------------------------------------------------------------------
// Plan records
// ---------------------------------------------------------------------------

/// An atomic checklist line item belonging to exactly one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub text: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// One unit of intent at a given horizon.
///
/// `id` is a millisecond-derived opaque string, stable across edits and
/// unique within its horizon bucket. `created_at` is immutable after
/// creation. `completed` is derived-but-stored: the completion propagator
/// keeps it consistent with the sub-task flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub title: String,
    pub deadline: NaiveDate,
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Plan {
    /// Number of completed sub-tasks.
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }

    /// Whether the sub-task list is non-empty and fully completed.
    ///
    /// A plan with zero sub-tasks never derives completion from this; its
    /// `completed` flag changes only by direct toggle.
    pub fn all_subtasks_completed(&self) -> bool {
        !self.subtasks.is_empty() && self.subtasks.iter().all(|s| s.completed)
    }
}

/// Caller-supplied fields for creating a plan.
///
/// The title is trimmed and must not be empty; sub-task texts that trim to
/// empty are dropped before storage.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub title: String,
    pub deadline: NaiveDate,
    pub subtasks: Vec<String>,
}

/// Caller-supplied fields for a full-overwrite update.
///
/// `update` replaces the whole record except `id` and `created_at`, so the
/// sub-task list here must be complete, including entries to keep unchanged.
#[derive(Debug, Clone)]
pub struct PlanUpdate {
    pub title: String,
    pub deadline: NaiveDate,
    pub subtasks: Vec<Subtask>,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Activity records
// ---------------------------------------------------------------------------

/// A finished timeline activity in the append-only log.
///
/// `start_time`/`end_time` are clock times within the 24-hour day; an end
/// earlier than the start means the activity crossed midnight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub color: String,
    pub completion_time: DateTime<Utc>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ActivityRecord {
    /// Whether the activity crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Duration in minutes, accounting for the midnight wrap.
    pub fn duration_minutes(&self) -> i64 {
        let delta = (self.end_time - self.start_time).num_minutes();
        if delta < 0 { delta + 24 * 60 } else { delta }
    }
}

/// Caller-supplied fields for appending an activity record.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub name: String,
    pub category: String,
    pub color: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
