//! # cellpeak Schema Definition
//!
//! Arrow schemas and column vocabularies for the three tables derived from a
//! cycling test, plus the constants of the persisted artifact.
//!
//! ## Raw table
//!
//! | Column | Type | Required | Description |
//! |--------|------|----------|-------------|
//! | data_point | Int64 | Yes | Sample index |
//! | test_time | Float64 | Yes | Seconds since test start |
//! | step_time | Float64 | Yes | Seconds since step start |
//! | date_time | Float64 | No | Excel serial day number |
//! | step_index | Int32 | Yes | Step number |
//! | cycle_index | Int32 | Yes | Cycle number |
//! | sub_step_index | Int32 | Yes | Sub-step number |
//! | current | Float64 | Yes | Current (raw units) |
//! | voltage | Float64 | Yes | Voltage (V) |
//! | charge_capacity | Float64 | Yes | Charge capacity (raw units) |
//! | discharge_capacity | Float64 | Yes | Discharge capacity (raw units) |
//! | internal_resistance | Float64 | No | Internal resistance (Ohm) |
//!
//! ## Step table
//!
//! One row per (cycle, step, sub_step) with `type`, `info` and the seven
//! statistics of every measure flattened to `{measure}_{statistic}`.
//!
//! ## Summary table
//!
//! One row per cycle. Identification columns (`date_time_txt`, `test_time`,
//! `data_point`, `cycle_index`) followed by Float64 metric columns.

mod builders;
/// Raw table column name constants.
pub mod columns;
mod constants;
mod manifest;
/// Step table column name constants.
pub mod step_columns;
/// Summary table column name constants.
pub mod summary_columns;
mod validation;

#[cfg(test)]
mod tests;

pub use builders::{
    create_fid_schema, create_raw_schema, create_raw_schema_arc, create_step_schema,
    create_summary_schema,
};
pub use constants::*;
pub use manifest::ArtifactInfo;
pub use validation::{validate_raw_schema, SchemaValidationError};
