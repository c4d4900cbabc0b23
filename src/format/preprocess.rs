use super::{FormatOptions, SentinelPolicy};
use crate::models::{EntryKind, FormatWarning, RawLine, WarningKind};

/// Prefix of a cell that has already been through the formatter and exported.
const FORMATTED_PREFIX: &str = "'- ";
const NBSP: char = '\u{a0}';

/// A raw cell after cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preprocessed {
    /// The cell is already a bullet list; return it as is.
    AlreadyFormatted,
    /// Non-empty lines, in their original order.
    Lines(Vec<RawLine>),
}

/// Spreadsheet editors drop the leading `'` of a formatted cell once it is
/// clicked, so a bare leading `-` counts as well.
#[must_use]
pub fn is_already_formatted(raw: &str) -> bool {
    if raw.starts_with('-') {
        format!("'{raw}").starts_with(FORMATTED_PREFIX)
    } else {
        raw.starts_with(FORMATTED_PREFIX)
    }
}

/// Clean a raw cell and split it into lines.
///
/// Newlines must already be normalized to `\n`.
#[must_use]
pub fn preprocess(
    raw: &str,
    kind: EntryKind,
    options: &FormatOptions,
) -> (Preprocessed, Vec<FormatWarning>) {
    if options.detect_formatted && is_already_formatted(raw) {
        return (Preprocessed::AlreadyFormatted, Vec::new());
    }

    let mut warnings = Vec::new();
    let mut lines = Vec::new();

    for (idx, line) in raw.split('\n').enumerate() {
        let number = idx + 1;
        let mut text = line.replace(NBSP, " ");
        if idx == 0 {
            text = text.trim_start_matches('\'').to_string();
        }
        if text.is_empty() {
            continue;
        }

        if text == kind.sentinel() {
            match (options.sentinel, kind) {
                (SentinelPolicy::Drop, EntryKind::Experience) => {
                    warnings.push(FormatWarning::new(
                        kind,
                        WarningKind::SentinelRemoved,
                        Some(number),
                    ));
                    continue;
                }
                // Education headers are only stripped from the top of the cell.
                (SentinelPolicy::Drop, EntryKind::Education) => {
                    if idx == 0 {
                        continue;
                    }
                }
                (SentinelPolicy::Keep, _) => {
                    warnings.push(FormatWarning::new(
                        kind,
                        WarningKind::SentinelKept,
                        Some(number),
                    ));
                }
            }
        }

        lines.push(RawLine::new(number, text));
    }

    (Preprocessed::Lines(lines), warnings)
}
