//! # Step Classification
//!
//! Groups the raw table by (cycle, step), aggregates every measure with
//! seven statistics and labels each interval with a [`StepType`]. Sub-steps
//! are folded into their step.
//!
//! Labels come either from the ordered heuristic rules in [`rules`], where
//! the last matching rule wins, or from a user supplied
//! [`StepSpecification`] which replaces the heuristics entirely.
//!
//! ```rust,no_run
//! use cellpeak::steps::{make_step_table, StepSpecification};
//! # fn demo(dataset: &mut cellpeak::dataset::Dataset) -> Result<(), cellpeak::steps::StepError> {
//! make_step_table(dataset, None)?;
//!
//! let spec = StepSpecification::from_path("steps.csv", false)?;
//! make_step_table(dataset, Some(&spec))?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod rules;
mod selection;
mod spec;
mod stats;
mod table;
mod types;

#[cfg(test)]
mod tests;

pub use error::StepError;
pub use selection::resolve_step_types;
pub use spec::{StepSpecEntry, StepSpecification};
pub use stats::{relative_delta, ColumnStats};
pub use table::{
    build_step_table, ensure_step_table, make_step_table, validate_step_table, StepRecord,
    StepTable,
};
pub use types::StepType;
