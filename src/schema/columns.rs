//! Raw measurement column names.
//!
//! One row per instrument sample. The names are the canonical snake_case
//! spelling used in memory, in persisted artifacts and in CSV exports.

/// Monotonically increasing sample index
pub const DATA_POINT: &str = "data_point";
/// Seconds since the start of the test
pub const TEST_TIME: &str = "test_time";
/// Seconds since the start of the current step
pub const STEP_TIME: &str = "step_time";
/// Wall clock time as an Excel serial day number
pub const DATE_TIME: &str = "date_time";
/// Step number within the cycle
pub const STEP_INDEX: &str = "step_index";
/// Cycle number, starting at 1
pub const CYCLE_INDEX: &str = "cycle_index";
/// Sub-step number inside a step
pub const SUB_STEP_INDEX: &str = "sub_step_index";
/// Current in the instrument's current unit
pub const CURRENT: &str = "current";
/// Cell voltage in volts
pub const VOLTAGE: &str = "voltage";
/// Accumulated charge capacity within the cycle
pub const CHARGE_CAPACITY: &str = "charge_capacity";
/// Accumulated discharge capacity within the cycle
pub const DISCHARGE_CAPACITY: &str = "discharge_capacity";
/// Internal resistance (optional)
pub const INTERNAL_RESISTANCE: &str = "internal_resistance";

/// Columns every raw table carries.
pub const REQUIRED_RAW_COLUMNS: [&str; 10] = [
    DATA_POINT,
    TEST_TIME,
    STEP_TIME,
    STEP_INDEX,
    CYCLE_INDEX,
    SUB_STEP_INDEX,
    CURRENT,
    VOLTAGE,
    CHARGE_CAPACITY,
    DISCHARGE_CAPACITY,
];

/// Columns that may be absent from a raw table.
pub const OPTIONAL_RAW_COLUMNS: [&str; 2] = [DATE_TIME, INTERNAL_RESISTANCE];
