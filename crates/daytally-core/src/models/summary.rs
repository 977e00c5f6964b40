//! Aggregated task statistics, overall and per category

use super::task::{MidnightPolicy, TaskRecord};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Counters for one category tag
///
/// Time is kept in whole minutes so that merging summaries is exact; hours
/// are derived on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryAggregate {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    /// Minutes spent on completed tasks only
    #[serde(default)]
    pub completed_minutes: u64,
}

impl CategoryAggregate {
    /// Completion ratio as a percentage, 0.0 when the category is empty
    pub fn completion_percentage(&self) -> f64 {
        percentage(self.completed_tasks, self.total_tasks)
    }

    /// Hours spent on completed tasks
    pub fn completed_time(&self) -> f64 {
        minutes_to_hours(self.completed_minutes)
    }

    pub fn merge(&mut self, other: &CategoryAggregate) {
        self.total_tasks += other.total_tasks;
        self.completed_tasks += other.completed_tasks;
        self.completed_minutes += other.completed_minutes;
    }
}

// JSON output carries both the exact minutes and the derived hours
impl Serialize for CategoryAggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CategoryAggregate", 4)?;
        state.serialize_field("total_tasks", &self.total_tasks)?;
        state.serialize_field("completed_tasks", &self.completed_tasks)?;
        state.serialize_field("completed_minutes", &self.completed_minutes)?;
        state.serialize_field("completed_time", &self.completed_time())?;
        state.end()
    }
}

/// Result of scanning a sequence of note lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total_tasks: u64,
    pub completed_tasks: u64,

    /// Lines shaped like a task but carrying an invalid clock time
    #[serde(default)]
    pub skipped_lines: u64,

    /// Category tag -> counters, ordered by tag
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryAggregate>,
}

impl TaskSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parsed record into the counters
    pub fn record(&mut self, task: &TaskRecord, policy: MidnightPolicy) {
        let category = self.categories.entry(task.category.clone()).or_default();

        self.total_tasks += 1;
        category.total_tasks += 1;

        if task.completed {
            self.completed_tasks += 1;
            category.completed_tasks += 1;
            category.completed_minutes += task.time_range.duration_minutes(policy);
        }
    }

    /// Overall completion percentage, 0.0 when no task was found
    pub fn completion_percentage(&self) -> f64 {
        percentage(self.completed_tasks, self.total_tasks)
    }

    /// Hours spent on completed tasks across all categories
    pub fn completed_time(&self) -> f64 {
        minutes_to_hours(self.completed_minutes())
    }

    /// Minutes spent on completed tasks across all categories
    pub fn completed_minutes(&self) -> u64 {
        self.categories.values().map(|c| c.completed_minutes).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_tasks == 0
    }

    /// Merge a summary computed over a disjoint slice of lines
    pub fn merge(&mut self, other: &TaskSummary) {
        self.total_tasks += other.total_tasks;
        self.completed_tasks += other.completed_tasks;
        self.skipped_lines += other.skipped_lines;
        for (name, aggregate) in &other.categories {
            self.categories
                .entry(name.clone())
                .or_default()
                .merge(aggregate);
        }
    }

    /// Categories sorted by time spent, largest first
    pub fn top_categories(&self, n: usize) -> Vec<(&String, &CategoryAggregate)> {
        let mut sorted: Vec<_> = self.categories.iter().collect();
        sorted.sort_by(|a, b| {
            b.1.completed_minutes
                .cmp(&a.1.completed_minutes)
                .then_with(|| a.0.cmp(b.0))
        });
        sorted.truncate(n);
        sorted
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn minutes_to_hours(minutes: u64) -> f64 {
    minutes as f64 / 60.0
}
