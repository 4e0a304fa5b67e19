//! Step table column names.
//!
//! Every aggregated measure is flattened to `{measure}_{statistic}`, for
//! example `current_avr` or `voltage_delta`.

/// Cycle number of the step
pub const CYCLE: &str = "cycle";
/// Step number inside the cycle
pub const STEP: &str = "step";
/// Sub-step number inside the step
pub const SUB_STEP: &str = "sub_step";
/// Classified step type label (`""` when unset)
pub const TYPE: &str = "type";
/// Free-text information from a step specification
pub const INFO: &str = "info";

/// Aggregated data point measure
pub const POINT: &str = "point";
/// Aggregated step time measure
pub const STEP_TIME: &str = "step_time";
/// Aggregated current measure
pub const CURRENT: &str = "current";
/// Aggregated voltage measure
pub const VOLTAGE: &str = "voltage";
/// Aggregated charge capacity measure
pub const CHARGE: &str = "charge";
/// Aggregated discharge capacity measure
pub const DISCHARGE: &str = "discharge";
/// Aggregated internal resistance measure (optional)
pub const IR: &str = "ir";

/// Mean
pub const STAT_AVR: &str = "avr";
/// Sample standard deviation
pub const STAT_STD: &str = "std";
/// Minimum
pub const STAT_MIN: &str = "min";
/// Maximum
pub const STAT_MAX: &str = "max";
/// First value
pub const STAT_FIRST: &str = "first";
/// Last value
pub const STAT_LAST: &str = "last";
/// Relative change between first and last value
pub const STAT_DELTA: &str = "delta";

/// Statistic suffixes in column order.
pub const STATISTICS: [&str; 7] = [
    STAT_AVR, STAT_STD, STAT_MIN, STAT_MAX, STAT_FIRST, STAT_LAST, STAT_DELTA,
];

/// Measures aggregated for every step, in column order.
pub const MEASURES: [&str; 6] = [POINT, STEP_TIME, CURRENT, VOLTAGE, CHARGE, DISCHARGE];

/// Flattened column name for a measure and statistic.
pub fn flattened(measure: &str, statistic: &str) -> String {
    format!("{}_{}", measure, statistic)
}
