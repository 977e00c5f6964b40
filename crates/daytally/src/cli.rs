//! Rendering of task statistics for the terminal
//!
//! Provides the summary table, the per-line check report and their JSON forms.

use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Row, Table};
use daytally_core::{
    CategoryAggregate, MidnightPolicy, ParseError, TaskLineParser, TaskRecord, TaskSummary,
};
use std::path::PathBuf;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    InvalidLines { path: PathBuf, count: usize },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::InvalidLines { path, count } => {
                write!(
                    f,
                    "{} task line(s) with invalid times in {}",
                    count,
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CliError {}

// ============================================================================
// Line Check
// ============================================================================

/// Outcome of parsing one task-shaped line of a note
pub struct CheckedLine {
    /// 1-based line number in the note
    pub line_number: usize,
    pub outcome: Result<TaskRecord, ParseError>,
    /// Duration counted toward completed time (0 for open tasks)
    pub hours: f64,
}

/// Parse every line, keeping task lines and lines with invalid times
pub fn check_lines<S: AsRef<str>>(lines: &[S], policy: MidnightPolicy) -> Vec<CheckedLine> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let outcome = TaskLineParser::parse_line(line.as_ref()).transpose()?;
            let hours = match &outcome {
                Ok(task) if task.completed => task.time_range.duration_hours(policy),
                _ => 0.0,
            };
            Some(CheckedLine {
                line_number: index + 1,
                outcome,
                hours,
            })
        })
        .collect()
}

// ============================================================================
// Formatters
// ============================================================================

/// Format the summary as text + table (human) or JSON
pub fn format_summary(
    summary: &TaskSummary,
    top: Option<usize>,
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
    }

    if summary.is_empty() {
        return "No tasks found.".to_string();
    }

    let mut lines = vec![];
    lines.push(format!("Total tasks:            {}", summary.total_tasks));
    lines.push(format!("Completed tasks:        {}", summary.completed_tasks));
    lines.push(format!(
        "Completion percentage:  {}",
        format_percent(summary.completion_percentage())
    ));
    lines.push(format!(
        "Time spent:             {} hours",
        format_hours(summary.completed_time())
    ));
    lines.push(String::new());
    lines.push("Category-wise Task Analysis".to_string());

    let categories = summary.top_categories(top.unwrap_or(usize::MAX));
    lines.push(format_category_table(&categories, no_color));

    lines.join("\n")
}

fn format_category_table(categories: &[(&String, &CategoryAggregate)], no_color: bool) -> String {
    const HEADERS: [&str; 5] = [
        "Category",
        "Completed Tasks",
        "Total Tasks",
        "Completion %",
        "Time Spent (hours)",
    ];
    const COLORS: [Color; 5] = [
        Color::Cyan,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
    ];

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Apply colors only if enabled
    if no_color {
        table.set_header(HEADERS.to_vec());
    } else {
        table.set_header(HEADERS.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    }

    for (name, data) in categories {
        let values = [
            name.to_string(),
            data.completed_tasks.to_string(),
            data.total_tasks.to_string(),
            format_percent(data.completion_percentage()),
            format_hours(data.completed_time()),
        ];

        if no_color {
            table.add_row(Row::from(values.to_vec()));
        } else {
            table.add_row(
                values
                    .iter()
                    .zip(COLORS)
                    .map(|(value, color)| Cell::new(value).fg(color)),
            );
        }
    }

    for index in 1..HEADERS.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.to_string()
}

/// Format checked lines as a table (human) or JSON
pub fn format_check(checked: &[CheckedLine], json: bool) -> String {
    if json {
        let entries: Vec<_> = checked
            .iter()
            .map(|c| match &c.outcome {
                Ok(task) => serde_json::json!({
                    "line": c.line_number,
                    "task": task,
                    "hours": c.hours,
                }),
                Err(e) => serde_json::json!({
                    "line": c.line_number,
                    "error": e.to_string(),
                }),
            })
            .collect();
        return serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string());
    }

    if checked.is_empty() {
        return "No task lines found.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Line", "Status", "Time", "Hours", "Category"]);

    for entry in checked {
        let line = entry.line_number.to_string();
        let row = match &entry.outcome {
            Ok(task) => vec![
                line,
                if task.completed { "done" } else { "open" }.to_string(),
                task.time_range.to_string(),
                format_hours(entry.hours),
                format!("#{}", task.category),
            ],
            Err(ParseError::InvalidTime { value }) => vec![
                line,
                "error".to_string(),
                format!("invalid time {}", value),
                "-".to_string(),
                "-".to_string(),
            ],
        };
        table.add_row(row);
    }

    table.to_string()
}

// ============================================================================
// Utilities
// ============================================================================

fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

// ============================================================================
// Tests
// ============================================================================
