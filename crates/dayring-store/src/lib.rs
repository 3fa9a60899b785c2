//! Storage layer for dayring: the plan document, the activity log, and
//! their synchronous JSON file persistence.

pub mod activity;
pub mod document;
pub mod error;
pub mod models;
pub mod paths;
mod persist;
pub mod store;

pub use activity::ActivityLog;
pub use document::PlanDocument;
pub use error::StoreError;
pub use models::{
    ActivityRecord, Horizon, HorizonParseError, NewActivity, NewPlan, Plan, PlanUpdate, Subtask,
};
pub use store::PlanStore;
