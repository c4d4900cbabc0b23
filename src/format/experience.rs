use super::preprocess::{preprocess, Preprocessed};
use super::render::{render_experience, ExperienceRecord};
use super::{CellFormatter, FormatOptions, MalformedPolicy};
use crate::models::{EntryKind, FormatWarning, Formatted, ParsedExperience, WarningKind};

const TITLE_SEP: &str = " at ";
const PERIOD_SEP: &str = " · ";

/// Split `<title> at <company> · <period>`.
///
/// The title ends at the first `" at "`; the period starts after the last
/// `" · "`, so company names may contain either separator.
#[must_use]
pub fn parse_experience_line(line: &str) -> Option<ParsedExperience> {
    let (title, rest) = line.split_once(TITLE_SEP)?;
    let (company, period) = rest.rsplit_once(PERIOD_SEP)?;
    if title.is_empty() || company.is_empty() || period.is_empty() {
        return None;
    }
    Some(ParsedExperience {
        title: title.to_string(),
        company: company.to_string(),
        period: period.to_string(),
    })
}

/// Formats work-experience cells into company-grouped bullets.
pub struct ExperienceFormatter {
    options: FormatOptions,
}

impl Default for ExperienceFormatter {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl ExperienceFormatter {
    #[must_use]
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    fn format_unquoted(&self, raw: &str) -> Formatted {
        let kind = EntryKind::Experience;
        let (pre, mut warnings) = preprocess(raw, kind, &self.options);
        let lines = match pre {
            Preprocessed::AlreadyFormatted => return Formatted::new(raw, warnings),
            Preprocessed::Lines(lines) => lines,
        };

        let mut records = Vec::with_capacity(lines.len());
        for line in lines {
            if line.text == kind.sentinel() {
                records.push(ExperienceRecord::Verbatim(line.text));
                continue;
            }
            match parse_experience_line(&line.text) {
                Some(exp) => records.push(ExperienceRecord::Entry(exp)),
                None => match self.options.on_malformed {
                    MalformedPolicy::Strict => {
                        warnings.push(FormatWarning::new(
                            kind,
                            WarningKind::MalformedCell,
                            Some(line.number),
                        ));
                        return Formatted::new(raw, warnings);
                    }
                    MalformedPolicy::Lenient => {
                        warnings.push(FormatWarning::new(
                            kind,
                            WarningKind::MalformedLineDropped,
                            Some(line.number),
                        ));
                    }
                },
            }
        }

        Formatted::new(render_experience(&records), warnings)
    }
}

impl CellFormatter for ExperienceFormatter {
    fn kind(&self) -> EntryKind {
        EntryKind::Experience
    }

    fn format_cell(&self, raw: &str) -> Formatted {
        let Formatted { text, warnings } = self.format_unquoted(raw);
        Formatted::new(self.options.quote.apply(text), warnings)
    }
}
