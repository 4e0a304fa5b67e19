use crate::curves::CurveError;

/// Errors that can occur during CSV export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Capacity curves could not be extracted
    #[error("Curve error: {0}")]
    CurveError(#[from] CurveError),

    /// The dataset has no raw data
    #[error("Dataset is empty")]
    EmptyDataset,
}
