//! The append-only log of completed timeline activities.
//!
//! Activities are what the day review and history features report against.
//! The log is keyed by millisecond-derived ids like the plan store and
//! follows the same persistence discipline: mutate in memory, then one
//! write per mutation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::StoreError;
use crate::models::{ActivityRecord, NewActivity};

/// Owns the activity records and their backing file.
#[derive(Debug)]
pub struct ActivityLog {
    path: PathBuf,
    records: Vec<ActivityRecord>,
}

impl ActivityLog {
    /// Open a log against `path`. Missing or malformed files yield an empty
    /// log, same as [`crate::PlanStore::open`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = crate::persist::load_json_or_default(&path);
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, in append order.
    pub fn all(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose completion time falls within `[from, to]` (whole days,
    /// inclusive).
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&ActivityRecord> {
        self.records
            .iter()
            .filter(|r| {
                let d = r.completion_time.date_naive();
                d >= from && d <= to
            })
            .collect()
    }

    /// Records completed on one calendar date.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&ActivityRecord> {
        self.between(date, date)
    }

    /// Append a record completed at `completed_at` and persist.
    ///
    /// Fails with [`StoreError::EmptyActivityName`] when the name trims to
    /// empty. Tags that trim to empty are dropped.
    pub fn append(
        &mut self,
        new: NewActivity,
        completed_at: DateTime<Utc>,
    ) -> Result<ActivityRecord, StoreError> {
        let name = new.name.trim().to_owned();
        if name.is_empty() {
            return Err(StoreError::EmptyActivityName);
        }

        let tags: Vec<String> = new
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();

        let id = allocate_id(&self.records, completed_at.timestamp_millis());
        let record = ActivityRecord {
            id,
            name,
            category: new.category,
            color: new.color,
            completion_time: completed_at,
            start_time: new.start_time,
            end_time: new.end_time,
            tags,
        };
        self.records.push(record.clone());

        self.persist()?;
        Ok(record)
    }

    /// Remove a record if present and persist. Idempotent.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Drop every record and persist. Used by the daily retention sweep.
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let cleared = self.records.len();
        if cleared > 0 {
            self.records.clear();
            self.persist()?;
        }
        Ok(cleared)
    }

    pub fn persist(&self) -> Result<(), StoreError> {
        crate::persist::write_json(&self.path, &self.records)
    }
}

fn allocate_id(records: &[ActivityRecord], now_ms: i64) -> String {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !records.iter().any(|r| r.id == id) {
            return id;
        }
        candidate += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, TimeZone};

    use super::*;

    fn log() -> (ActivityLog, tempfile::TempDir) {
        let tmp = tempfile::TempDir::new().unwrap();
        let log = ActivityLog::open(tmp.path().join("activity.json"));
        (log, tmp)
    }

    fn activity(name: &str) -> NewActivity {
        NewActivity {
            name: name.into(),
            category: "work".into(),
            color: "#3b82f6".into(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            tags: vec![],
        }
    }

    #[test]
    fn append_rejects_empty_name() {
        let (mut log, _tmp) = log();
        let result = log.append(activity("   "), Utc::now());
        assert!(matches!(result, Err(StoreError::EmptyActivityName)));
        assert!(log.is_empty());
    }

    #[test]
    fn between_is_inclusive_of_both_ends() {
        let (mut log, _tmp) = log();
        for (name, day) in [("first", 1), ("second", 3), ("third", 5)] {
            let at = Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap();
            log.append(activity(name), at).unwrap();
        }

        let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let hits = log.between(from, to);
        let names: Vec<&str> = hits.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn clear_empties_the_log() {
        let (mut log, _tmp) = log();
        log.append(activity("a"), Utc::now()).unwrap();
        log.append(activity("b"), Utc::now()).unwrap();

        assert_eq!(log.clear().unwrap(), 2);
        assert!(log.is_empty());
        // Clearing an already-empty log is a no-op.
        assert_eq!(log.clear().unwrap(), 0);
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut log, _tmp) = log();
        let rec = log.append(activity("a"), Utc::now()).unwrap();
        assert!(log.remove(&rec.id).unwrap());
        assert!(!log.remove(&rec.id).unwrap());
    }
}
