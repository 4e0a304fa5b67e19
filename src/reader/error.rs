/// Errors that can occur during reading
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// The artifact was written by an incompatible version
    #[error("Wrong file version {found}, supported are {minimum} to {maximum}")]
    WrongFileVersion {
        /// Version found in the artifact
        found: u32,
        /// Oldest supported version
        minimum: u32,
        /// Newest supported version
        maximum: u32,
    },

    /// A required entry is missing or unreadable
    #[error("Corrupt artifact: {0}")]
    CorruptArtifact(String),

    /// Invalid table content
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The raw table does not have the raw schema
    #[error("Invalid raw table: {0}")]
    SchemaError(#[from] crate::schema::SchemaValidationError),

    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
