/// Errors that can occur while making or querying step tables
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// The dataset has no raw data
    #[error("Dataset is empty")]
    EmptyDataset,

    /// A step specification misses required columns or holds bad values
    #[error("Malformed step specification: {0}")]
    MalformedSpecification(String),

    /// A step type label outside the known vocabulary
    #[error("Unknown step type: {0}")]
    UnknownStepType(String),

    /// The step table has not been made
    #[error("Step table not made")]
    StepTableNotMade,

    /// I/O error reading a specification file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),
}
