//! Data models for daytally

pub mod summary;
pub mod task;

pub use summary::{CategoryAggregate, TaskSummary};
pub use task::{MidnightPolicy, TaskRecord, TimeRange};
