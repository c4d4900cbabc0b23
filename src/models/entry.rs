use serde::{Deserialize, Serialize};

/// Placeholder rendered for a school or degree that cannot be determined.
pub const UNKNOWN_LABEL: &str = "??";
/// Placeholder rendered for a period that cannot be determined.
pub const UNKNOWN_PERIOD: &str = "????";

/// Which career-history column a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Experience,
    Education,
}

impl EntryKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
        }
    }

    /// The header line the recruiting platform sometimes pastes above the entries.
    #[must_use]
    pub fn sentinel(&self) -> &'static str {
        match self {
            EntryKind::Experience => "Profile experience",
            EntryKind::Education => "Profile education",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cleaned line of a raw cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based position in the raw cell, before empty lines were dropped.
    pub number: usize,
    pub text: String,
}

impl RawLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// A work-experience entry: `<title> at <company> · <period>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedExperience {
    pub title: String,
    pub company: String,
    pub period: String,
}

/// An education field that may be absent from the pasted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Known(String),
    Missing,
}

impl Field {
    #[must_use]
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Field::Known(s) => Some(s),
            Field::Missing => None,
        }
    }

    /// Render the field, substituting `placeholder` when missing.
    #[must_use]
    pub fn or_placeholder<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.as_known().unwrap_or(placeholder)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Known(s.to_string())
    }
}

/// An education entry. Only the school is required by the platform, so any
/// field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEducation {
    pub school: Field,
    pub degree: Field,
    pub period: Field,
}

impl ParsedEducation {
    /// `- <degree>: <school> (<period>)`
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "- {}: {} ({})",
            self.degree.or_placeholder(UNKNOWN_LABEL),
            self.school.or_placeholder(UNKNOWN_LABEL),
            self.period.or_placeholder(UNKNOWN_PERIOD)
        )
    }
}
