//! Warning log for formatting runs.
//!
//! Appends [`FormatWarning`] records to a JSONL file so an operator can find
//! and hand-fix the cells the formatter could not handle.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::FormatWarning;

/// One line of the log: the warning plus the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedWarning {
    /// Input file the warning was raised for.
    pub file: String,
    #[serde(flatten)]
    pub warning: FormatWarning,
}

/// Appends warnings to a JSONL file.
pub struct WarningLog {
    log_path: PathBuf,
}

impl WarningLog {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    /// Append all warnings for `file`.
    pub fn append(&self, file: &str, warnings: &[FormatWarning]) -> Result<()> {
        if warnings.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        for warning in warnings {
            let entry = LoggedWarning {
                file: file.to_string(),
                warning: warning.clone(),
            };
            writeln!(out, "{}", serde_json::to_string(&entry)?)?;
        }
        Ok(())
    }

    /// Remove the log file.
    pub fn clear(&self) -> Result<()> {
        if self.log_path.exists() {
            std::fs::remove_file(&self.log_path)?;
        }
        Ok(())
    }
}

/// Read a warning log. Unparseable lines are skipped.
pub fn read_warning_log(path: &Path) -> Result<Vec<LoggedWarning>> {
    if !path.exists() {
        return Ok(vec![]);
    }

    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(entry) = serde_json::from_str::<LoggedWarning>(&line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Counts of logged warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WarningSummary {
    pub total: usize,
    pub by_kind: HashMap<String, usize>,
    pub by_column: HashMap<String, usize>,
}

#[must_use]
pub fn summarize_warnings(entries: &[LoggedWarning]) -> WarningSummary {
    let mut summary = WarningSummary {
        total: entries.len(),
        ..WarningSummary::default()
    };
    for entry in entries {
        *summary
            .by_kind
            .entry(entry.warning.kind.as_str().to_string())
            .or_default() += 1;
        *summary
            .by_column
            .entry(entry.warning.column.as_str().to_string())
            .or_default() += 1;
    }
    summary
}
