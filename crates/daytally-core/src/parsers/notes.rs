//! Notes directory source: discovers note files and feeds their lines to the
//! aggregator
//!
//! Unreadable files are recorded in the [`LoadReport`] and skipped; only a
//! missing notes directory fails the whole scan.

use crate::aggregate::aggregate_with;
use crate::config::Config;
use crate::error::{CoreError, ErrorSeverity, LoadError, LoadReport};
use crate::models::{MidnightPolicy, TaskSummary};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Reads note files from a directory
#[derive(Debug, Clone)]
pub struct NotesSource {
    recursive: bool,
    /// Lowercase extensions without dots; empty accepts every file
    extensions: Vec<String>,
}

impl Default for NotesSource {
    fn default() -> Self {
        Self {
            recursive: false,
            extensions: vec!["md".to_string()],
        }
    }
}

impl NotesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            recursive: config.recursive,
            extensions: config.extensions.clone(),
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Discover note files under `dir`, sorted by path
    ///
    /// Regular files and symlinks to regular files are returned. Without
    /// `recursive`, files in subdirectories are ignored. Entries that cannot
    /// be walked (unreadable subfolders, symlink loops) are recorded in
    /// `report` and skipped.
    pub fn discover(
        &self,
        dir: &Path,
        report: &mut LoadReport,
    ) -> Result<Vec<PathBuf>, CoreError> {
        if !dir.is_dir() {
            return Err(CoreError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(dir).display().to_string();
                    warn!(path = %path, error = %e, "Skipping unreadable entry");
                    report.add_warning("notes", format!("Cannot walk {}: {}", path, e));
                    continue;
                }
            };

            if entry.file_type().is_file() && self.matches_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!(dir = %dir.display(), count = files.len(), "Discovered note files");
        Ok(files)
    }

    /// Read a single note file as UTF-8 lines
    pub fn read_file(path: &Path) -> Result<Vec<String>, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Ok(content.lines().map(str::to_string).collect())
    }

    /// Aggregate every note file separately and merge the per-file summaries
    pub fn summarize(
        &self,
        dir: &Path,
        policy: MidnightPolicy,
        report: &mut LoadReport,
    ) -> Result<TaskSummary, CoreError> {
        let mut summary = TaskSummary::new();

        for path in self.discover(dir, report)? {
            if let Some(lines) = Self::read_graceful(&path, report) {
                let file_summary = aggregate_with(&lines, policy);
                if file_summary.skipped_lines > 0 {
                    debug!(
                        path = %path.display(),
                        skipped = file_summary.skipped_lines,
                        "Task lines with invalid times"
                    );
                }
                summary.merge(&file_summary);
            }
        }

        Ok(summary)
    }

    fn read_graceful(path: &Path, report: &mut LoadReport) -> Option<Vec<String>> {
        report.files_scanned += 1;

        match Self::read_file(path) {
            Ok(lines) => Some(lines),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable note");
                report.files_failed += 1;
                report.add_error(LoadError {
                    severity: ErrorSeverity::Warning,
                    ..LoadError::from_core_error("notes", &e)
                });
                None
            }
        }
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == e)
            })
            .unwrap_or(false)
    }
}
