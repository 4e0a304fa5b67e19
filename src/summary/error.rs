use crate::steps::StepError;

/// Errors that can occur while deriving a summary
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// The dataset has no raw data
    #[error("Dataset is empty")]
    EmptyDataset,

    /// The active mass is zero, negative or not a number
    #[error("Invalid active mass: {0}")]
    InvalidMass(f64),

    /// Step table creation or lookup failed
    #[error("Step table error: {0}")]
    StepError(#[from] StepError),

    /// Columns of the summary have different lengths
    #[error("Summary column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        /// Offending column
        column: String,
        /// Row count of the summary
        expected: usize,
        /// Row count of the column
        actual: usize,
    },
}
