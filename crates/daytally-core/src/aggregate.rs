//! Task aggregation over note lines
//!
//! A pure fold: no I/O, no state outside the input. Summaries over disjoint
//! inputs combine with [`TaskSummary::merge`] into the summary over their
//! concatenation, so callers are free to split the work per file.

use crate::models::{MidnightPolicy, TaskSummary};
use crate::parsers::TaskLineParser;
use tracing::debug;

/// Aggregate lines using the default midnight policy
pub fn aggregate<I, S>(lines: I) -> TaskSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate_with(lines, MidnightPolicy::default())
}

/// Aggregate lines, measuring midnight-crossing ranges with `policy`
///
/// Lines that are not task lines contribute nothing. Task lines with invalid
/// clock times are skipped and counted in `skipped_lines`.
pub fn aggregate_with<I, S>(lines: I, policy: MidnightPolicy) -> TaskSummary
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = TaskSummary::new();

    for (index, line) in lines.into_iter().enumerate() {
        match TaskLineParser::parse_line(line.as_ref()) {
            Ok(Some(task)) => summary.record(&task, policy),
            Ok(None) => {}
            Err(e) => {
                debug!(line = index + 1, error = %e, "Skipping task line");
                summary.skipped_lines += 1;
            }
        }
    }

    summary
}
