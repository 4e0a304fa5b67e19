/// Errors that can occur during metadata processing
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// I/O error reading file system information
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Unknown file id key name
    #[error("Invalid file id key: {0} (expected size, modified or accessed)")]
    InvalidFileIdKey(String),

    /// Unknown cycle mode name
    #[error("Invalid cycle mode: {0} (expected anode or cathode)")]
    InvalidCycleMode(String),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
