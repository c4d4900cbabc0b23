use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CareerFmtError, Result};
use crate::format::FormatOptions;
use crate::table::Delimiter;

/// Settings file looked up in the working directory.
const CONFIG_FILE: &str = "careerfmt.toml";

/// Resolved configuration: where settings came from and what they are.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the settings file (it may not exist).
    pub config_path: PathBuf,
    /// Settings loaded from the file, or defaults.
    pub settings: Settings,
}

/// User-configurable settings from careerfmt.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Formatting behaviour.
    pub format: FormatOptions,
    /// Input file layout.
    pub input: InputSettings,
}

/// Input file settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub delimiter: Delimiter,
    /// Header of the work-experience column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_column: Option<String>,
    /// Header of the education column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_column: Option<String>,
}

impl Config {
    /// Load settings from `config_path`, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let settings = Self::load_settings(&config_path).unwrap_or_default();
        Self {
            config_path,
            settings,
        }
    }

    /// Config from `careerfmt.toml` in the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| CareerFmtError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd.join(CONFIG_FILE)))
    }

    /// An explicit settings file must exist and parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CareerFmtError::Config(format!("cannot read {}: {e}", path.display())))?;
        let settings = toml::from_str(&content)
            .map_err(|e| CareerFmtError::Config(format!("invalid {}: {e}", path.display())))?;
        Ok(Self {
            config_path: path.to_path_buf(),
            settings,
        })
    }

    fn load_settings(config_path: &Path) -> Option<Settings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid settings file");
                None
            }
        }
    }
}
