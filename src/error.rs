use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerFmtError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("file name has no extension: {path}")]
    MissingExtension { path: String },

    #[error("unsupported file type: {ext} (expected csv or txt)")]
    UnsupportedExtension { ext: String },

    #[error("column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("no columns selected: pass --experience-column and/or --education-column")]
    NoColumns,
}

pub type Result<T> = std::result::Result<T, CareerFmtError>;
