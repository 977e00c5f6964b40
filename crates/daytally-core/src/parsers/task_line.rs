//! Parser for checkbox task lines in daily notes
//!
//! Recognised shape, anchored at the start of the line:
//!
//! ```text
//! - [x] 09:00 - 10:30 Write report #work
//! - [ ] 11:00 - 11:30 Review PR #work
//! ```
//!
//! Anything else (prose, headings, `[X]`, untagged tasks) is not a task line.

use crate::error::ParseError;
use crate::models::{TaskRecord, TimeRange};
use chrono::NaiveTime;
use regex::Regex;
use std::sync::OnceLock;

/// Captures: 1=status mark, 2=start, 3=end, 4=category
fn task_line_regex() -> &'static Regex {
    static TASK_LINE_RE: OnceLock<Regex> = OnceLock::new();
    TASK_LINE_RE.get_or_init(|| {
        Regex::new(r"^- \[(x| )\] ([0-9]{2}:[0-9]{2}) - ([0-9]{2}:[0-9]{2}) .+? #(\w+)").unwrap()
    })
}

/// Parser for task lines
pub struct TaskLineParser;

impl TaskLineParser {
    /// Parse one line of a note
    ///
    /// Returns `Ok(None)` for lines that are not task lines, and
    /// `Err(ParseError::InvalidTime)` when the shape matches but a clock time
    /// is out of range (e.g. `25:00`).
    pub fn parse_line(line: &str) -> Result<Option<TaskRecord>, ParseError> {
        let Some(cap) = task_line_regex().captures(line) else {
            return Ok(None);
        };

        let completed = &cap[1] == "x";
        let start = Self::parse_clock(&cap[2])?;
        let end = Self::parse_clock(&cap[3])?;

        Ok(Some(TaskRecord {
            completed,
            time_range: TimeRange::new(start, end),
            category: cap[4].to_string(),
        }))
    }

    /// Parse a 24-hour `HH:MM` clock time
    fn parse_clock(value: &str) -> Result<NaiveTime, ParseError> {
        NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| ParseError::InvalidTime {
            value: value.to_string(),
        })
    }
}
