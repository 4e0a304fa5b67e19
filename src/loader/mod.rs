//! # cellpeak Loader Module
//!
//! Raw files enter the pipeline through a [`Loader`]. A loader knows the unit
//! fractions and classification limits of its instrument and turns one raw
//! file into one or more [`Dataset`]s with provenance filled in.
//!
//! The bundled [`CsvLoader`] reads columnar text exports. Header names may
//! be the canonical snake_case spelling (`data_point`, `cycle_index`) or the
//! Arbin export style (`Data_Point`, `Cycle_Index`, `Voltage(V)`).

mod delimited;
mod error;


use std::path::Path;

pub use delimited::{canonical_column_name, CsvLoader};
pub use error::LoaderError;

use crate::dataset::Dataset;
use crate::metadata::{RawLimits, RawUnits};

/// Source of raw cycling data for one instrument format
pub trait Loader {
    /// Short name of the format
    fn name(&self) -> &str;

    /// Unit fractions of the raw columns
    fn raw_units(&self) -> RawUnits;

    /// Classification limits of the instrument
    fn raw_limits(&self) -> RawLimits;

    /// Load every test contained in a raw file
    fn load(&self, path: &Path) -> Result<Vec<Dataset>, LoaderError>;
}
