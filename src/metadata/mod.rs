//! # Metadata Module for cellpeak
//!
//! Descriptive and provenance information attached to a cycling test:
//!
//! 1. **Dataset info**: name, active mass, start time and instrument identifiers
//! 2. **File ids**: size and timestamps of every raw file a test was built from
//! 3. **Instrument parameters**: raw unit fractions and classification limits,
//!    threaded explicitly into the engines as immutable values

mod error;
mod file_id;
mod info;
mod units;


pub use error::MetadataError;
pub use file_id::{FileId, FileIdKey};
pub use info::{
    datetime_to_xldate, seconds_between, xldate_to_datetime, CycleMode, DatasetInfo, DEFAULT_MASS,
};
pub use units::{specific_converter, RawLimits, RawUnits, TargetUnits};
