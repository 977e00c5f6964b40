//! Parsers for daily note files

pub mod notes;
pub mod task_line;

pub use notes::NotesSource;
pub use task_line::TaskLineParser;
