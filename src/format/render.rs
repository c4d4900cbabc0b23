use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::ParsedExperience;

/// Marker that makes spreadsheets treat a cell as text rather than a formula.
const TEXT_MARKER: char = '\'';

/// When to prefix output cells with the text marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QuotePolicy {
    /// Every non-empty cell not already carrying the marker.
    Always,
    /// Only cells starting with the `-` bullet, so passed-through cells are not marked twice.
    #[default]
    Bulleted,
    Never,
}

impl QuotePolicy {
    #[must_use]
    pub fn apply(&self, text: String) -> String {
        let mark = match self {
            QuotePolicy::Always => !text.is_empty() && !text.starts_with(TEXT_MARKER),
            QuotePolicy::Bulleted => text.starts_with('-'),
            QuotePolicy::Never => false,
        };
        if mark {
            format!("{TEXT_MARKER}{text}")
        } else {
            text
        }
    }
}

/// One rendered unit of an experience cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceRecord {
    Entry(ParsedExperience),
    /// A line emitted as is (a kept header line). Breaks the current group.
    Verbatim(String),
}

/// Render experience records, grouping consecutive entries at the same company
/// under one `- <company>` bullet.
#[must_use]
pub fn render_experience(records: &[ExperienceRecord]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(records.len() * 2);
    let mut current_company: Option<&str> = None;

    for record in records {
        match record {
            ExperienceRecord::Entry(exp) => {
                if current_company != Some(exp.company.as_str()) {
                    out.push(format!("- {}", exp.company));
                    current_company = Some(exp.company.as_str());
                }
                out.push(format!("  · {} ({})", exp.title, exp.period));
            }
            ExperienceRecord::Verbatim(text) => {
                out.push(text.clone());
                current_company = None;
            }
        }
    }

    out.join("\n")
}

/// Render education lines, one per output line.
#[must_use]
pub fn render_lines(lines: &[String]) -> String {
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(title: &str, company: &str, period: &str) -> ExperienceRecord {
        ExperienceRecord::Entry(ParsedExperience {
            title: title.into(),
            company: company.into(),
            period: period.into(),
        })
    }

    fn top_level_bullets(text: &str) -> usize {
        text.lines().filter(|l| l.starts_with("- ")).count()
    }

    #[test]
    fn groups_consecutive_same_company() {
        let text = render_experience(&[
            exp("Engineer", "Acme", "2019 - 2020"),
            exp("Sr Engineer", "Acme", "2020 - 2022"),
        ]);
        assert_eq!(
            text,
            "- Acme\n  · Engineer (2019 - 2020)\n  · Sr Engineer (2020 - 2022)"
        );
    }

    #[test]
    fn returning_to_a_company_starts_a_new_group() {
        let records = [
            exp("A", "Acme", "1"),
            exp("B", "Globex", "2"),
            exp("C", "Acme", "3"),
        ];
        let text = render_experience(&records);
        assert_eq!(top_level_bullets(&text), 3);
    }

    #[test]
    fn bullet_count_equals_company_runs() {
        let companies = ["A", "A", "B", "B", "B", "A", "C", "C", "A"];
        let records: Vec<_> = companies
            .iter()
            .enumerate()
            .map(|(i, c)| exp(&format!("t{i}"), c, "p"))
            .collect();
        let runs = 1 + companies.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(top_level_bullets(&render_experience(&records)), runs);
    }

    #[test]
    fn verbatim_breaks_group() {
        let text = render_experience(&[
            ExperienceRecord::Verbatim("Profile experience".into()),
            exp("A", "Acme", "1"),
            ExperienceRecord::Verbatim("Profile experience".into()),
            exp("B", "Acme", "2"),
        ]);
        assert_eq!(
            text,
            "Profile experience\n- Acme\n  · A (1)\nProfile experience\n- Acme\n  · B (2)"
        );
    }

    #[test]
    fn no_records_renders_empty() {
        assert_eq!(render_experience(&[]), "");
        assert_eq!(render_lines(&[]), "");
    }

    #[test]
    fn quote_always_skips_empty() {
        assert_eq!(QuotePolicy::Always.apply("x".into()), "'x");
        assert_eq!(QuotePolicy::Always.apply(String::new()), "");
    }

    #[test]
    fn quote_always_never_doubles_marker() {
        assert_eq!(QuotePolicy::Always.apply("'- Acme".into()), "'- Acme");
        assert_eq!(QuotePolicy::Always.apply("'freelance".into()), "'freelance");
        assert_eq!(QuotePolicy::Always.apply("- Acme".into()), "'- Acme");
    }

    #[test]
    fn quote_bulleted_only_marks_bullets() {
        assert_eq!(QuotePolicy::Bulleted.apply("- Acme".into()), "'- Acme");
        assert_eq!(QuotePolicy::Bulleted.apply("'- Acme".into()), "'- Acme");
        assert_eq!(QuotePolicy::Bulleted.apply("Acme".into()), "Acme");
    }

    #[test]
    fn quote_never() {
        assert_eq!(QuotePolicy::Never.apply("- Acme".into()), "- Acme");
    }
}
