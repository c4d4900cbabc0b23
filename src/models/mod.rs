pub mod entry;
pub mod warning;

pub use entry::{EntryKind, Field, ParsedEducation, ParsedExperience, RawLine};
pub use warning::{FormatWarning, WarningKind};

/// The result of formatting one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub text: String,
    pub warnings: Vec<FormatWarning>,
}

impl Formatted {
    #[must_use]
    pub fn new(text: impl Into<String>, warnings: Vec<FormatWarning>) -> Self {
        Self {
            text: text.into(),
            warnings,
        }
    }

    /// Tag every warning with the data row the cell came from.
    #[must_use]
    pub fn at_cell(mut self, cell: usize) -> Self {
        for w in &mut self.warnings {
            w.cell = cell;
        }
        self
    }
}
