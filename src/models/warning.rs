use serde::{Deserialize, Serialize};

use super::entry::EntryKind;

/// Why a warning was raised, and what the formatter did about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A line could not be parsed; the whole cell was left as it was.
    MalformedCell,
    /// A line could not be parsed and was left out of the output.
    MalformedLineDropped,
    /// A line was structurally inconsistent and was rendered as well as possible.
    MalformedLineBestEffort,
    /// The platform's header line was found and removed.
    SentinelRemoved,
    /// The platform's header line was found and left in the output.
    SentinelKept,
}

impl WarningKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::MalformedCell => "malformed_cell",
            WarningKind::MalformedLineDropped => "malformed_line_dropped",
            WarningKind::MalformedLineBestEffort => "malformed_line_best_effort",
            WarningKind::SentinelRemoved => "sentinel_removed",
            WarningKind::SentinelKept => "sentinel_kept",
        }
    }
}

/// A non-fatal issue found while formatting one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatWarning {
    /// 0-based data row of the cell. Zero when formatting a lone cell.
    pub cell: usize,
    /// 1-based line within the cell, when the issue is tied to one line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub column: EntryKind,
    pub kind: WarningKind,
}

impl FormatWarning {
    #[must_use]
    pub fn new(column: EntryKind, kind: WarningKind, line: Option<usize>) -> Self {
        Self {
            cell: 0,
            line,
            column,
            kind,
        }
    }

    /// Operator-facing explanation of the warning.
    #[must_use]
    pub fn message(&self) -> String {
        match (self.kind, self.column) {
            (WarningKind::MalformedCell, EntryKind::Experience) => {
                "work experience entry is not in the form [title] at [company] · [period]; \
                 the cell was left unchanged"
                    .to_string()
            }
            (WarningKind::MalformedCell, EntryKind::Education) => {
                "education entry is not in the proper format; the cell was left unchanged"
                    .to_string()
            }
            (WarningKind::MalformedLineDropped, _) => format!(
                "{} entry is not in the proper format and was left out of the output",
                self.column
            ),
            (WarningKind::MalformedLineBestEffort, _) => format!(
                "{} entry is not in the proper format; check the rearranged fields by hand",
                self.column
            ),
            (WarningKind::SentinelRemoved, _) => {
                format!("\"{}\" line was removed", self.column.sentinel())
            }
            (WarningKind::SentinelKept, _) => format!(
                "\"{}\" line was found; remove it from the output manually",
                self.column.sentinel()
            ),
        }
    }
}

impl std::fmt::Display for FormatWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "row {} line {}: {}", self.cell, line, self.message()),
            None => write!(f, "row {}: {}", self.cell, self.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_reason_codes() {
        let w = FormatWarning::new(EntryKind::Experience, WarningKind::MalformedCell, Some(2));
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"kind\":\"malformed_cell\""));
        assert!(json.contains("\"column\":\"experience\""));
        assert!(json.contains("\"line\":2"));
    }

    #[test]
    fn omits_missing_line() {
        let w = FormatWarning::new(EntryKind::Education, WarningKind::SentinelRemoved, None);
        let json = serde_json::to_string(&w).unwrap();
        assert!(!json.contains("\"line\""));
    }

    #[test]
    fn display_includes_position() {
        let mut w = FormatWarning::new(EntryKind::Education, WarningKind::SentinelKept, Some(1));
        w.cell = 4;
        let text = w.to_string();
        assert!(text.starts_with("row 4 line 1:"));
        assert!(text.contains("Profile education"));
    }

    #[test]
    fn as_str_matches_serde() {
        for kind in [
            WarningKind::MalformedCell,
            WarningKind::MalformedLineDropped,
            WarningKind::MalformedLineBestEffort,
            WarningKind::SentinelRemoved,
            WarningKind::SentinelKept,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
