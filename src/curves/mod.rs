//! # Capacity Curves
//!
//! Capacity against voltage for the charge and discharge steps of every
//! cycle, laid out on one capacity axis with one of three [`CurveMethod`]s:
//!
//! | method | second half-cycle | carry into next cycle |
//! |---|---|---|
//! | back-and-forth | `max(first) - second + carry` | `min(second)` |
//! | forth | `second + max(first) + carry` | `max(second)` |
//! | forth-and-forth | `second + shift` | unchanged |
//!
//! The first half-cycle is always translated by the carry (the shift for
//! forth-and-forth). Lookups need the step table.

mod error;
mod method;
mod series;
mod stitch;

#[cfg(test)]
mod tests;

pub use error::CurveError;
pub use method::CurveMethod;
pub use series::{get_ccap, get_dcap, get_ocv, CurveSeries, OcvCurve};
pub use stitch::{categorical, get_cap, CurveOptions, CurvePoint, CycleCurves};
