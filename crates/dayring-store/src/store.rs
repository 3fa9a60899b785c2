//! The plan store: CRUD over the horizon-bucketed collection.
//!
//! The store is an explicitly owned object, not a hidden singleton: callers
//! construct one per session (or per test) against a file path. Every
//! mutation triggers exactly one [`PlanStore::persist`]. Mutations apply to
//! the in-memory document first, so a failed write leaves the session
//! consistent and the error reportable as a non-fatal warning.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::document::PlanDocument;
use crate::error::StoreError;
use crate::models::{Horizon, NewPlan, Plan, PlanUpdate, Subtask};

/// Owns the canonical plan collection and its backing file.
#[derive(Debug)]
pub struct PlanStore {
    path: PathBuf,
    document: PlanDocument,
}

impl PlanStore {
    /// Open a store against `path`, loading the persisted document.
    ///
    /// A missing file yields an empty store. A malformed file also yields an
    /// empty store (logged, not propagated) rather than blocking startup.
    /// All four horizon buckets exist afterwards regardless of what the
    /// persisted document contained.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = crate::persist::load_json_or_default(&path);
        Self { path, document }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // -------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------

    /// All plans in a horizon bucket, in insertion order.
    pub fn bucket(&self, horizon: Horizon) -> &[Plan] {
        self.document.bucket(horizon)
    }

    /// Fetch a plan by id within a horizon.
    pub fn get(&self, horizon: Horizon, id: &str) -> Option<&Plan> {
        self.document.bucket(horizon).iter().find(|p| p.id == id)
    }

    /// Total number of plans across all buckets.
    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Create a plan in the given horizon bucket and persist.
    ///
    /// Fails with [`StoreError::EmptyTitle`] when the title trims to empty.
    /// Sub-task texts that trim to empty are silently dropped. The id is
    /// derived from `now` in milliseconds, bumped past any collision within
    /// the bucket. Returns the stored plan.
    pub fn create(
        &mut self,
        horizon: Horizon,
        new: NewPlan,
        now: DateTime<Utc>,
    ) -> Result<Plan, StoreError> {
        let title = new.title.trim().to_owned();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let subtasks: Vec<Subtask> = new
            .subtasks
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Subtask::new)
            .collect();

        let bucket = self.document.bucket_mut(horizon);
        let id = allocate_id(bucket, now.timestamp_millis());

        let plan = Plan {
            id,
            title,
            deadline: new.deadline,
            subtasks,
            completed: false,
            created_at: now,
        };
        bucket.push(plan.clone());

        self.persist()?;
        Ok(plan)
    }

    /// Replace a plan's contents and persist.
    ///
    /// This is a full overwrite, not a merge: the caller supplies the
    /// complete sub-task list, including entries to keep unchanged. `id` and
    /// `created_at` are preserved. Fails with [`StoreError::PlanNotFound`]
    /// when no plan with `id` exists in `horizon` -- silently dropping an
    /// edit would confuse the user.
    pub fn update(
        &mut self,
        horizon: Horizon,
        id: &str,
        update: PlanUpdate,
    ) -> Result<Plan, StoreError> {
        let title = update.title.trim().to_owned();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let subtasks: Vec<Subtask> = update
            .subtasks
            .into_iter()
            .filter(|s| !s.text.trim().is_empty())
            .collect();

        let plan = self
            .document
            .bucket_mut(horizon)
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PlanNotFound {
                horizon,
                id: id.to_owned(),
            })?;

        plan.title = title;
        plan.deadline = update.deadline;
        plan.subtasks = subtasks;
        plan.completed = update.completed;
        let stored = plan.clone();

        self.persist()?;
        Ok(stored)
    }

    /// Remove a plan if present and persist. Removing an absent id is an
    /// idempotent no-op with no error. Returns whether a plan was removed.
    pub fn delete(&mut self, horizon: Horizon, id: &str) -> Result<bool, StoreError> {
        let bucket = self.document.bucket_mut(horizon);
        let before = bucket.len();
        bucket.retain(|p| p.id != id);

        if bucket.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Mutable access to a plan for the completion propagator.
    ///
    /// The store does not persist on behalf of this accessor: the caller is
    /// responsible for calling [`PlanStore::persist`] exactly once after its
    /// mutations.
    pub fn plan_mut(&mut self, horizon: Horizon, id: &str) -> Result<&mut Plan, StoreError> {
        self.document
            .bucket_mut(horizon)
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PlanNotFound {
                horizon,
                id: id.to_owned(),
            })
    }

    /// Retain only daily plans matching the predicate and persist when
    /// anything was removed. Returns the number of plans removed.
    pub fn retain_daily(
        &mut self,
        mut keep: impl FnMut(&Plan) -> bool,
    ) -> Result<usize, StoreError> {
        let bucket = self.document.bucket_mut(Horizon::Daily);
        let before = bucket.len();
        bucket.retain(|p| keep(p));
        let removed = before - bucket.len();

        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Serialize the full four-bucket document to the backing file.
    pub fn persist(&self) -> Result<(), StoreError> {
        crate::persist::write_json(&self.path, &self.document)
    }
}

/// Derive a bucket-unique id from a millisecond timestamp.
///
/// Two creations within the same millisecond would collide, so the candidate
/// is bumped until free.
fn allocate_id(bucket: &[Plan], now_ms: i64) -> String {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !bucket.iter().any(|p| p.id == id) {
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
    use chrono::NaiveDate;

    use super::*;

    fn deadline() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn store() -> (PlanStore, tempfile::TempDir) {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = PlanStore::open(tmp.path().join("plans.json"));
        (store, tmp)
    }

    #[test]
    fn create_rejects_empty_title() {
        let (mut store, _tmp) = store();
        let result = store.create(
            Horizon::Daily,
            NewPlan {
                title: "   ".into(),
                deadline: deadline(),
                subtasks: vec![],
            },
            Utc::now(),
        );
        assert!(matches!(result, Err(StoreError::EmptyTitle)));
        assert!(store.is_empty(), "no mutation on validation failure");
    }

    #[test]
    fn create_drops_blank_subtasks() {
        let (mut store, _tmp) = store();
        let plan = store
            .create(
                Horizon::Daily,
                NewPlan {
                    title: "Write report".into(),
                    deadline: deadline(),
                    subtasks: vec!["Outline".into(), "  ".into(), "Draft".into()],
                },
                Utc::now(),
            )
            .unwrap();
        let texts: Vec<&str> = plan.subtasks.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Outline", "Draft"]);
    }

    #[test]
    fn ids_are_unique_within_a_bucket() {
        let (mut store, _tmp) = store();
        let now = Utc::now();
        // Same timestamp for both creations forces the collision path.
        let a = store
            .create(
                Horizon::Week,
                NewPlan {
                    title: "a".into(),
                    deadline: deadline(),
                    subtasks: vec![],
                },
                now,
            )
            .unwrap();
        let b = store
            .create(
                Horizon::Week,
                NewPlan {
                    title: "b".into(),
                    deadline: deadline(),
                    subtasks: vec![],
                },
                now,
            )
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_preserves_id_and_created_at() {
        let (mut store, _tmp) = store();
        let created = store
            .create(
                Horizon::Month,
                NewPlan {
                    title: "Original".into(),
                    deadline: deadline(),
                    subtasks: vec!["one".into()],
                },
                Utc::now(),
            )
            .unwrap();

        let updated = store
            .update(
                Horizon::Month,
                &created.id,
                PlanUpdate {
                    title: "Renamed".into(),
                    deadline: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                    subtasks: vec![Subtask::new("two")],
                    completed: false,
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.subtasks.len(), 1);
        assert_eq!(updated.subtasks[0].text, "two");
    }

    #[test]
    fn update_unknown_id_is_reported() {
        let (mut store, _tmp) = store();
        let result = store.update(
            Horizon::Year,
            "12345",
            PlanUpdate {
                title: "x".into(),
                deadline: deadline(),
                subtasks: vec![],
                completed: false,
            },
        );
        assert!(matches!(
            result,
            Err(StoreError::PlanNotFound { horizon: Horizon::Year, .. })
        ));
    }

    #[test]
    fn delete_is_idempotent() {
        let (mut store, _tmp) = store();
        let plan = store
            .create(
                Horizon::Daily,
                NewPlan {
                    title: "to remove".into(),
                    deadline: deadline(),
                    subtasks: vec![],
                },
                Utc::now(),
            )
            .unwrap();

        assert!(store.delete(Horizon::Daily, &plan.id).unwrap());
        assert!(!store.delete(Horizon::Daily, &plan.id).unwrap());
        assert_eq!(store.bucket(Horizon::Daily).len(), 0);
    }
}
