//! # Summary Derivation
//!
//! One row per cycle with specific capacities, coulombic efficiencies,
//! capacity losses, irreversible capacity metrics and shifted capacities.
//!
//! Rows are picked from the raw table (last sample of every cycle, or the
//! externally supplied statistics rows), raw capacities are converted to
//! specific capacities with the dataset's mass and units, and the optional
//! end voltage, internal resistance and open circuit voltage columns are
//! looked up through the step table.
//!
//! ```rust,no_run
//! use cellpeak::summary::{make_summary, SummaryOptions};
//! # fn demo(dataset: &mut cellpeak::dataset::Dataset) -> Result<(), cellpeak::summary::SummaryError> {
//! make_summary(dataset, &SummaryOptions::default())?;
//! let summary = dataset.summary.as_ref().expect("summary made");
//! let efficiency = summary.get("coulombic_efficiency");
//! # Ok(())
//! # }
//! ```
//!
//! The RIC columns divide by the previous second half-cycle capacity without
//! a zero guard, so a zero capacity shows up as an infinity or NaN.

mod augment;
mod derive;
mod error;
mod options;
mod table;

#[cfg(test)]
mod tests;

pub use augment::{add_end_voltage, add_internal_resistance, add_ocv};
pub use derive::{
    add_derived_columns, base_summary, cumsum_skipna, irreversible_levels, make_summary,
};
pub use error::SummaryError;
pub use options::{SummaryOptions, DEFAULT_DANIEL_NUMBER};
pub use table::{SummaryColumn, SummaryTable};
