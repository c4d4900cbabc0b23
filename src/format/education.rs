use super::preprocess::{preprocess, Preprocessed};
use super::render::render_lines;
use super::{CellFormatter, FormatOptions, MalformedPolicy};
use crate::models::entry::UNKNOWN_PERIOD;
use crate::models::{EntryKind, Field, FormatWarning, Formatted, ParsedEducation, WarningKind};

const SCHOOL_SEP: &str = ", ";
const PERIOD_SEP: &str = " · ";
const MID_DOT: char = '·';

/// How one education line was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EducationLine {
    /// School and degree were told apart (any of them may still be missing).
    Parsed(ParsedEducation),
    /// A single label that may be either the school or the degree.
    Label { label: String, period: Field },
    /// A comma or mid-dot was present but the line did not split cleanly.
    Malformed,
}

impl EducationLine {
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            EducationLine::Parsed(edu) => Some(edu.render()),
            EducationLine::Label { label, period } => Some(format!(
                "- {label} ({})",
                period.or_placeholder(UNKNOWN_PERIOD)
            )),
            EducationLine::Malformed => None,
        }
    }
}

fn field(s: &str) -> Field {
    if s.trim().is_empty() {
        Field::Missing
    } else {
        Field::Known(s.to_string())
    }
}

/// Parse one education line.
///
/// The platform writes `<school>, <degree> · <period>` with the degree and
/// period optional. The school/degree boundary is the LAST `", "`, so a comma
/// inside the degree name ("Bachelor of Arts, Honours") moves the boundary.
/// That misplacement is a known limitation of the input, not corrected here.
#[must_use]
pub fn parse_education_line(line: &str) -> EducationLine {
    let has_comma = line.contains(',');
    let has_dot = line.contains(MID_DOT);

    match (has_comma, has_dot) {
        (true, true) => {
            let Some((school, rest)) = line.rsplit_once(SCHOOL_SEP) else {
                return EducationLine::Malformed;
            };
            let parts: Vec<&str> = rest.split(PERIOD_SEP).collect();
            match parts.as_slice() {
                [degree, period] => EducationLine::Parsed(ParsedEducation {
                    school: field(school),
                    degree: field(degree),
                    period: field(period),
                }),
                _ => EducationLine::Malformed,
            }
        }
        (true, false) => match line.rsplit_once(SCHOOL_SEP) {
            Some((school, degree)) => EducationLine::Parsed(ParsedEducation {
                school: field(school),
                degree: field(degree),
                period: Field::Missing,
            }),
            None => EducationLine::Malformed,
        },
        (false, true) => label_with_period(line),
        (false, false) => EducationLine::Label {
            label: line.to_string(),
            period: Field::Missing,
        },
    }
}

/// `<school or degree> · <period>`, or a bare period when no label survives the split.
fn label_with_period(line: &str) -> EducationLine {
    let parts: Vec<&str> = line.split(PERIOD_SEP).collect();
    match parts.as_slice() {
        [label, period] if !label.trim().is_empty() => EducationLine::Label {
            label: (*label).to_string(),
            period: field(period),
        },
        _ => {
            let period = line.trim_start_matches([MID_DOT, ' ']);
            EducationLine::Parsed(ParsedEducation {
                school: Field::Missing,
                degree: Field::Missing,
                period: field(period),
            })
        }
    }
}

/// Best-effort reading of a line that [`parse_education_line`] found malformed.
///
/// Uses the last `", "` and the last `" · "` that exist and leaves the rest as
/// placeholders.
#[must_use]
pub fn best_effort_education_line(line: &str) -> EducationLine {
    match line.rsplit_once(SCHOOL_SEP) {
        Some((school, rest)) => {
            let (degree, period) = match rest.rsplit_once(PERIOD_SEP) {
                Some((degree, period)) => (field(degree), field(period)),
                None => (field(rest), Field::Missing),
            };
            EducationLine::Parsed(ParsedEducation {
                school: field(school),
                degree,
                period,
            })
        }
        None => match line.rsplit_once(PERIOD_SEP) {
            Some((label, period)) => EducationLine::Label {
                label: label.to_string(),
                period: field(period),
            },
            None => EducationLine::Label {
                label: line.to_string(),
                period: Field::Missing,
            },
        },
    }
}

/// Formats education cells, one bullet per entry.
pub struct EducationFormatter {
    options: FormatOptions,
}

impl Default for EducationFormatter {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

impl EducationFormatter {
    #[must_use]
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    fn format_unquoted(&self, raw: &str) -> Formatted {
        let kind = EntryKind::Education;
        let (pre, mut warnings) = preprocess(raw, kind, &self.options);
        let lines = match pre {
            Preprocessed::AlreadyFormatted => return Formatted::new(raw, warnings),
            Preprocessed::Lines(lines) => lines,
        };

        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let mut parsed = parse_education_line(&line.text);
            if parsed == EducationLine::Malformed {
                match self.options.on_malformed {
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
                            WarningKind::MalformedLineBestEffort,
                            Some(line.number),
                        ));
                        parsed = best_effort_education_line(&line.text);
                    }
                }
            }

            if let Some(rendered) = parsed.render() {
                out.push(rendered);
            }
        }

        Formatted::new(render_lines(&out), warnings)
    }
}

impl CellFormatter for EducationFormatter {
    fn kind(&self) -> EntryKind {
        EntryKind::Education
    }

    fn format_cell(&self, raw: &str) -> Formatted {
        let Formatted { text, warnings } = self.format_unquoted(raw);
        Formatted::new(self.options.quote.apply(text), warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{QuotePolicy, SentinelPolicy};

    fn unquoted(on_malformed: MalformedPolicy) -> EducationFormatter {
        EducationFormatter::new(FormatOptions {
            on_malformed,
            quote: QuotePolicy::Never,
            ..FormatOptions::default()
        })
    }

    fn render(line: &str) -> String {
        parse_education_line(line).render().unwrap()
    }

    #[test]
    fn full_entry() {
        assert_eq!(
            render("State University, BA · 2015 - 2019"),
            "- BA: State University (2015 - 2019)"
        );
    }

    #[test]
    fn full_entry_recovers_fields() {
        let cases = [
            ("State University", "BA", "2015 - 2019"),
            ("University of California, Berkeley", "MSc Physics", "2001 - 2003"),
            ("École Polytechnique", "Diplôme d'ingénieur", "2010"),
        ];
        for (s, d, p) in cases {
            let parsed = parse_education_line(&format!("{s}, {d} · {p}"));
            assert_eq!(
                parsed,
                EducationLine::Parsed(ParsedEducation {
                    school: s.into(),
                    degree: d.into(),
                    period: p.into(),
                })
            );
        }
    }

    #[test]
    fn comma_in_degree_splits_at_wrong_place() {
        // Known limitation: the last comma wins.
        assert_eq!(
            render("State University, Bachelor of Arts, Honours · 2015 - 2019"),
            "- Honours: State University, Bachelor of Arts (2015 - 2019)"
        );
    }

    #[test]
    fn school_and_degree_without_period() {
        assert_eq!(render("State University, BA"), "- BA: State University (????)");
    }

    #[test]
    fn single_label_with_period() {
        assert_eq!(render("State University · 2015 - 2019"), "- State University (2015 - 2019)");
    }

    #[test]
    fn period_only() {
        assert_eq!(render("· 2015 - 2019"), "- ??: ?? (2015 - 2019)");
        assert_eq!(render("2015 · 2016 · 2017"), "- ??: ?? (2015 · 2016 · 2017)");
    }

    #[test]
    fn bare_label() {
        assert_eq!(render("State University"), "- State University (????)");
    }

    #[test]
    fn missing_comma_space_is_malformed() {
        assert_eq!(parse_education_line("MIT,BSc · 2019"), EducationLine::Malformed);
        assert_eq!(parse_education_line("MIT,BSc"), EducationLine::Malformed);
    }

    #[test]
    fn extra_mid_dot_after_comma_is_malformed() {
        assert_eq!(
            parse_education_line("MIT, BSc · Honours · 2019"),
            EducationLine::Malformed
        );
    }

    #[test]
    fn best_effort_uses_last_separators() {
        assert_eq!(
            best_effort_education_line("MIT, BSc · Honours · 2019").render().unwrap(),
            "- BSc · Honours: MIT (2019)"
        );
        assert_eq!(
            best_effort_education_line("MIT,BSc · 2019").render().unwrap(),
            "- MIT,BSc (2019)"
        );
        assert_eq!(
            best_effort_education_line("MIT,BSc").render().unwrap(),
            "- MIT,BSc (????)"
        );
    }

    #[test]
    fn formats_multi_line_cell_in_order() {
        let raw = "State University, BA · 2015 - 2019\nCity College\nMBA · 2021";
        let out = unquoted(MalformedPolicy::Strict).format_cell(raw);
        assert_eq!(
            out.text,
            "- BA: State University (2015 - 2019)\n- City College (????)\n- MBA (2021)"
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn strict_returns_original_cell() {
        let raw = "State University, BA · 2015\nMIT,BSc · 2019";
        let out = unquoted(MalformedPolicy::Strict).format_cell(raw);
        assert_eq!(out.text, raw);
        assert_eq!(out.warnings[0].kind, WarningKind::MalformedCell);
        assert_eq!(out.warnings[0].line, Some(2));
    }

    #[test]
    fn lenient_renders_best_effort() {
        let raw = "State University, BA · 2015\nMIT,BSc · 2019";
        let out = unquoted(MalformedPolicy::Lenient).format_cell(raw);
        assert_eq!(out.text, "- BA: State University (2015)\n- MIT,BSc (2019)");
        assert_eq!(out.warnings[0].kind, WarningKind::MalformedLineBestEffort);
    }

    #[test]
    fn leading_sentinel_removed_silently() {
        let out = unquoted(MalformedPolicy::Strict)
            .format_cell("Profile education\nState University, BA · 2015 - 2019");
        assert_eq!(out.text, "- BA: State University (2015 - 2019)");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn sentinel_kept_is_formatted_as_label() {
        let fmt = EducationFormatter::new(FormatOptions {
            sentinel: SentinelPolicy::Keep,
            quote: QuotePolicy::Never,
            ..FormatOptions::default()
        });
        let out = fmt.format_cell("Profile education\nMIT");
        assert_eq!(out.text, "- Profile education (????)\n- MIT (????)");
        assert_eq!(out.warnings[0].kind, WarningKind::SentinelKept);
    }

    #[test]
    fn sentinel_below_first_line_is_ordinary_text() {
        let out = unquoted(MalformedPolicy::Strict).format_cell("MIT\nProfile education");
        assert_eq!(out.text, "- MIT (????)\n- Profile education (????)");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn quote_always_passes_formatted_cell_through() {
        let fmt = EducationFormatter::new(FormatOptions {
            quote: QuotePolicy::Always,
            ..FormatOptions::default()
        });
        let once = fmt.format_cell("State University, BA · 2015 - 2019").text;
        assert_eq!(once, "'- BA: State University (2015 - 2019)");
        assert_eq!(fmt.format_cell(&once).text, once);
        assert_eq!(
            fmt.format_cell("- BA: State University (2015 - 2019)").text,
            once
        );
    }

    #[test]
    fn empty_cell_stays_empty() {
        let out = EducationFormatter::default().format_cell("");
        assert_eq!(out.text, "");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn quoted_and_idempotent() {
        let fmt = EducationFormatter::default();
        let once = fmt.format_cell("State University, BA · 2015 - 2019").text;
        assert_eq!(once, "'- BA: State University (2015 - 2019)");
        assert_eq!(fmt.format_cell(&once).text, once);
    }
}
