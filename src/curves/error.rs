use crate::steps::StepError;

/// Errors that can occur while extracting capacity curves
#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    /// The dataset has no raw data
    #[error("Dataset is empty")]
    EmptyDataset,

    /// No step of the requested kind in the cycle
    #[error("No {step_type} step found in cycle {cycle}")]
    NoDataForStep {
        /// Cycle number
        cycle: i32,
        /// Requested step kind
        step_type: String,
    },

    /// Step table lookup failed
    #[error("Step table error: {0}")]
    StepError(#[from] StepError),
}
