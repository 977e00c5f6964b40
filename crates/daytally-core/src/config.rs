//! User configuration loaded from `config.toml`
//!
//! Precedence is resolved by the caller: command-line flags and environment
//! variables override values from the file, which override the defaults here.

use crate::error::CoreError;
use crate::models::MidnightPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR_NAME: &str = "daytally";
const CONFIG_FILE_NAME: &str = "config.toml";

/// daytally settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the daily note files
    pub notes_dir: Option<PathBuf>,

    /// Descend into subdirectories of `notes_dir`
    pub recursive: bool,

    /// File extensions to scan, without the dot; empty means every file
    pub extensions: Vec<String>,

    /// How completed ranges ending before they start are measured
    pub midnight_policy: MidnightPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: None,
            recursive: false,
            extensions: vec!["md".to_string()],
            midnight_policy: MidnightPolicy::default(),
        }
    }
}

impl Config {
    /// Default config location: `<config_dir>/daytally/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse config from a TOML string
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, CoreError> {
        let config: Config = toml::from_str(content).map_err(|e| CoreError::ConfigParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
            source: e,
        })?;
        config.validate()
    }

    /// Load config from an explicit path; the file must exist
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::ConfigRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        debug!(path = %path.display(), "Loaded config");
        Self::from_toml_str(&content, path)
    }

    /// Load from `path` if given, else from the default location if present
    ///
    /// A missing default config is not an error and yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CoreError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.is_file() => Self::load(&default),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, CoreError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Notes directory, or an error telling the user how to set it
    pub fn notes_dir(&self) -> Result<&Path, CoreError> {
        self.notes_dir
            .as_deref()
            .ok_or_else(|| CoreError::InvalidConfig {
                message: "notes_dir is not set (use --notes-dir, DAYTALLY_NOTES_DIR or config.toml)"
                    .to_string(),
            })
    }

    /// Normalise extensions (strip leading dots, lowercase) and reject bad ones
    fn validate(mut self) -> Result<Self, CoreError> {
        for ext in &mut self.extensions {
            let normalized = ext.trim().trim_start_matches('.').to_lowercase();
            if normalized.is_empty() || normalized.contains(['/', '\\']) {
                return Err(CoreError::InvalidConfig {
                    message: format!("invalid extension '{}'", ext),
                });
            }
            *ext = normalized;
        }
        Ok(self)
    }
}
