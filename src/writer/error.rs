/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library while building record batches
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Dataset information could not be serialized
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The dataset has no raw data
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Saving without a summary needs `force`
    #[error("Summary not made, use force to save anyway")]
    SummaryNotMade,
}
