//! The persisted four-bucket plan document.
//!
//! The on-disk schema grew over time (the `daily` bucket arrived after the
//! others), so every bucket is defensively defaulted on deserialize: loading
//! a document written by an older version always yields all four buckets.

use serde::{Deserialize, Serialize};

use crate::models::{Horizon, Plan};

/// The full persisted structure: one ordered plan list per horizon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub week: Vec<Plan>,
    #[serde(default)]
    pub month: Vec<Plan>,
    #[serde(default)]
    pub year: Vec<Plan>,
    #[serde(default)]
    pub daily: Vec<Plan>,
}

impl PlanDocument {
    pub fn bucket(&self, horizon: Horizon) -> &Vec<Plan> {
        match horizon {
            Horizon::Week => &self.week,
            Horizon::Month => &self.month,
            Horizon::Year => &self.year,
            Horizon::Daily => &self.daily,
        }
    }

    pub fn bucket_mut(&mut self, horizon: Horizon) -> &mut Vec<Plan> {
        match horizon {
            Horizon::Week => &mut self.week,
            Horizon::Month => &mut self.month,
            Horizon::Year => &mut self.year,
            Horizon::Daily => &mut self.daily,
        }
    }

    /// Total number of plans across all buckets.
    pub fn len(&self) -> usize {
        Horizon::ALL.iter().map(|h| self.bucket(*h).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
