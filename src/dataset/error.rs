/// Errors that can occur during dataset operations
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset has no raw data
    #[error("Dataset is empty")]
    EmptyDataset,

    /// More raw files were appended than the merge limit allows
    #[error("Too many files to merge (limit is {limit})")]
    TooManyFilesToMerge {
        /// Configured maximum number of appended files
        limit: usize,
    },

    /// Columns of a table have different lengths
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        /// Offending column
        column: String,
        /// Row count of the table
        expected: usize,
        /// Row count of the column
        actual: usize,
    },

    /// Dataset index out of range
    #[error("No dataset with index {0}")]
    InvalidIndex(usize),
}
