use crate::dataset::DatasetError;
use crate::metadata::MetadataError;

/// Errors that can occur while loading raw files
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Provenance could not be captured
    #[error("Metadata error: {0}")]
    MetadataError(#[from] MetadataError),

    /// The loaded table is inconsistent
    #[error("Dataset error: {0}")]
    DatasetError(#[from] DatasetError),

    /// A required column is missing from the header
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A cell could not be parsed
    #[error("Line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        /// 1-based line number in the file
        line: usize,
        /// Canonical column name
        column: String,
        /// Offending text
        value: String,
    },
}
