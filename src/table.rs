//! Delimited-text tables: the I/O layer around the formatters.
//!
//! Cells are handed to the formatters with newlines normalized to `\n` and
//! missing values as empty strings.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{CareerFmtError, Result};
use crate::format::CellFormatter;
use crate::models::FormatWarning;

/// Accepted input file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "txt"];
/// Suffix added to the input file stem for the output file.
const OUTPUT_SUFFIX: &str = "_output";

/// Field delimiter of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// Check that `path` names a `.csv` or `.txt` file and return its extension.
pub fn validate_extension(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| CareerFmtError::MissingExtension {
            path: path.to_string_lossy().into_owned(),
        })?
        .to_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CareerFmtError::UnsupportedExtension { ext });
    }
    Ok(ext)
}

/// `<dir>/<stem>_output.<ext>` next to the input file.
#[must_use]
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}{OUTPUT_SUFFIX}");
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}

/// Convert `\r\n` and bare `\r` line breaks to `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// A header row plus data rows, all rows as wide as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a delimited file. The first record is the header row.
    pub fn read_file(path: &Path, delimiter: Delimiter) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::read(file, delimiter)
    }

    pub fn read<R: std::io::Read>(reader: R, delimiter: Delimiter) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.len() < width {
                row.resize(width, String::new());
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Write the table as a delimited file.
    pub fn write_file(&self, path: &Path, delimiter: Delimiter) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write(file, delimiter)
    }

    pub fn write<W: std::io::Write>(&self, writer: W, delimiter: Delimiter) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter.as_byte())
            .flexible(true)
            .from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Index of the column whose header is `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name.trim())
            .ok_or_else(|| CareerFmtError::ColumnNotFound {
                name: name.to_string(),
            })
    }

    /// Format every cell of one column in place.
    ///
    /// Cells are independent, so they are formatted in parallel. Warnings come
    /// back tagged with their data-row index, in row order.
    pub fn format_column(&mut self, column: usize, formatter: &dyn CellFormatter) -> Vec<FormatWarning> {
        let results: Vec<(String, Vec<FormatWarning>)> = self
            .rows
            .par_iter()
            .enumerate()
            .map(|(idx, row)| {
                let raw = row.get(column).map(|c| normalize_newlines(c)).unwrap_or_default();
                let formatted = formatter.format_cell(&raw).at_cell(idx);
                (formatted.text, formatted.warnings)
            })
            .collect();

        let mut warnings = Vec::new();
        for (row, (text, cell_warnings)) in self.rows.iter_mut().zip(results) {
            if let Some(cell) = row.get_mut(column) {
                *cell = text;
            }
            warnings.extend(cell_warnings);
        }
        warnings
    }
}
