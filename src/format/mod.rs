//! Career-history cell formatting.
//!
//! Raw cells pasted from recruiter result pages are split into lines, each line
//! is split into fields on the platform's delimiters (`" at "`, `", "`, `" · "`),
//! and the fields are rendered back as a bullet list. The core never fails:
//! malformed input degrades to a fallback selected by [`MalformedPolicy`] and is
//! reported through [`FormatWarning`](crate::models::FormatWarning) records.

pub mod education;
pub mod experience;
pub mod preprocess;
pub mod render;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{EntryKind, Formatted};

pub use education::EducationFormatter;
pub use experience::ExperienceFormatter;
pub use render::QuotePolicy;

/// What to do when a line lacks a delimiter its case requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Abandon the cell and return the raw text unchanged.
    #[default]
    Strict,
    /// Keep going: drop bad experience lines, render bad education lines best-effort.
    Lenient,
}

/// What to do with the `Profile experience` / `Profile education` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SentinelPolicy {
    #[default]
    Drop,
    /// Leave the line in the output verbatim and warn about it.
    Keep,
}

/// Formatting behaviour shared by both formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub on_malformed: MalformedPolicy,
    pub sentinel: SentinelPolicy,
    pub quote: QuotePolicy,
    /// Pass cells that already start with `'- ` through untouched.
    pub detect_formatted: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            on_malformed: MalformedPolicy::Strict,
            sentinel: SentinelPolicy::Drop,
            quote: QuotePolicy::Bulleted,
            detect_formatted: true,
        }
    }
}

/// A formatter for one career-history column.
pub trait CellFormatter: Send + Sync {
    /// Which column this formatter handles.
    fn kind(&self) -> EntryKind;

    /// Format one raw cell. Never fails; problems come back as warnings.
    fn format_cell(&self, raw: &str) -> Formatted;
}

/// Build the formatter for a column.
#[must_use]
pub fn formatter_for(kind: EntryKind, options: FormatOptions) -> Box<dyn CellFormatter> {
    match kind {
        EntryKind::Experience => Box::new(ExperienceFormatter::new(options)),
        EntryKind::Education => Box::new(EducationFormatter::new(options)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = FormatOptions::default();
        assert_eq!(opts.on_malformed, MalformedPolicy::Strict);
        assert_eq!(opts.sentinel, SentinelPolicy::Drop);
        assert_eq!(opts.quote, QuotePolicy::Bulleted);
        assert!(opts.detect_formatted);
    }

    #[test]
    fn formatter_for_returns_matching_kind() {
        let opts = FormatOptions::default();
        assert_eq!(
            formatter_for(EntryKind::Experience, opts).kind(),
            EntryKind::Experience
        );
        assert_eq!(
            formatter_for(EntryKind::Education, opts).kind(),
            EntryKind::Education
        );
    }

    #[test]
    fn options_deserialize_partial_toml() {
        let opts: FormatOptions = toml::from_str("on_malformed = \"lenient\"").unwrap();
        assert_eq!(opts.on_malformed, MalformedPolicy::Lenient);
        assert_eq!(opts.quote, QuotePolicy::Bulleted);
        assert!(opts.detect_formatted);
    }

    #[test]
    fn formatted_output_is_quoted_per_policy() {
        let opts = FormatOptions {
            quote: QuotePolicy::Always,
            ..FormatOptions::default()
        };
        let out = formatter_for(EntryKind::Education, opts).format_cell("MIT");
        assert_eq!(out.text, "'- MIT (????)");
    }
}
