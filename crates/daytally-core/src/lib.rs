//! daytally-core - Core library for daytally
//!
//! Provides the task line parser, the aggregation fold, the notes directory
//! source and configuration loading.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;

pub use aggregate::{aggregate, aggregate_with};
pub use config::Config;
pub use error::{CoreError, LoadReport, ParseError};
pub use models::{CategoryAggregate, MidnightPolicy, TaskRecord, TaskSummary, TimeRange};
pub use parsers::{NotesSource, TaskLineParser};
