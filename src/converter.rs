use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{CareerFmtError, Result};
use crate::format::{formatter_for, FormatOptions};
use crate::models::{EntryKind, FormatWarning};
use crate::table::{output_path, validate_extension, Delimiter, Table};

/// What to convert and how.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    /// Defaults to `<stem>_output.<ext>` beside the input.
    pub output: Option<PathBuf>,
    pub delimiter: Delimiter,
    pub experience_column: Option<String>,
    pub education_column: Option<String>,
    pub options: FormatOptions,
}

impl ConvertRequest {
    fn columns(&self) -> Vec<(EntryKind, &str)> {
        let mut columns = Vec::new();
        if let Some(name) = &self.experience_column {
            columns.push((EntryKind::Experience, name.as_str()));
        }
        if let Some(name) = &self.education_column {
            columns.push((EntryKind::Education, name.as_str()));
        }
        columns
    }
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResult {
    pub output: String,
    pub rows: usize,
    pub columns: Vec<EntryKind>,
    pub warnings: Vec<FormatWarning>,
}

/// Read the input table, format the selected columns and write the output table.
pub fn run_convert(request: &ConvertRequest) -> Result<ConvertResult> {
    validate_extension(&request.input)?;
    let columns = request.columns();
    if columns.is_empty() {
        return Err(CareerFmtError::NoColumns);
    }

    let mut table = Table::read_file(&request.input, request.delimiter)?;

    // Resolve every column before touching any cell.
    let resolved: Vec<(EntryKind, usize)> = columns
        .iter()
        .map(|&(kind, name)| table.column_index(name).map(|idx| (kind, idx)))
        .collect::<Result<_>>()?;

    tracing::info!(
        input = %request.input.display(),
        rows = table.rows.len(),
        "formatting career history columns"
    );

    let mut warnings = Vec::new();
    for &(kind, idx) in &resolved {
        let formatter = formatter_for(kind, request.options);
        let column_warnings = table.format_column(idx, formatter.as_ref());
        for w in &column_warnings {
            log_warning(w);
        }
        warnings.extend(column_warnings);
    }

    let output = request
        .output
        .clone()
        .unwrap_or_else(|| output_path(&request.input));
    table.write_file(&output, request.delimiter)?;

    tracing::info!(output = %output.display(), warnings = warnings.len(), "export complete");

    Ok(ConvertResult {
        output: display_path(&output),
        rows: table.rows.len(),
        columns: resolved.iter().map(|&(kind, _)| kind).collect(),
        warnings,
    })
}

/// Log one warning at `warn` level with its position as structured fields.
pub fn log_warning(w: &FormatWarning) {
    tracing::warn!(
        cell = w.cell,
        line = w.line,
        column = w.column.as_str(),
        kind = w.kind.as_str(),
        "{}",
        w.message()
    );
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
