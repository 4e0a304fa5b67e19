//! Summary table column names.

/// Formatted wall clock time of the selected row
pub const DATE_TIME_TXT: &str = "date_time_txt";
/// Test time of the selected row
pub const TEST_TIME: &str = "test_time";
/// Data point of the selected row
pub const DATA_POINT: &str = "data_point";
/// Cycle number
pub const CYCLE_INDEX: &str = "cycle_index";

/// Charge capacity in raw instrument units
pub const RAW_CHARGE_CAPACITY: &str = "raw_charge_capacity";
/// Discharge capacity in raw instrument units
pub const RAW_DISCHARGE_CAPACITY: &str = "raw_discharge_capacity";

/// Specific charge capacity
pub const CHARGE_CAPACITY: &str = "charge_capacity";
/// Specific discharge capacity
pub const DISCHARGE_CAPACITY: &str = "discharge_capacity";
/// Running sum of the specific charge capacity
pub const CUMULATED_CHARGE_CAPACITY: &str = "cumulated_charge_capacity";
/// Running sum of the specific discharge capacity
pub const CUMULATED_DISCHARGE_CAPACITY: &str = "cumulated_discharge_capacity";

/// 100 x second / first half-cycle capacity
pub const COULOMBIC_EFFICIENCY: &str = "coulombic_efficiency";
/// Second minus first half-cycle capacity
pub const COULOMBIC_DIFFERENCE: &str = "coulombic_difference";
/// Running sum of the coulombic efficiency
pub const CUMULATED_COULOMBIC_EFFICIENCY: &str = "cumulated_coulombic_efficiency";
/// Running sum of the coulombic difference
pub const CUMULATED_COULOMBIC_DIFFERENCE: &str = "cumulated_coulombic_difference";

/// Discharge capacity lost since the previous cycle
pub const DISCHARGE_CAPACITY_LOSS: &str = "discharge_capacity_loss";
/// Charge capacity lost since the previous cycle
pub const CHARGE_CAPACITY_LOSS: &str = "charge_capacity_loss";
/// Running sum of the discharge capacity loss
pub const CUMULATED_DISCHARGE_CAPACITY_LOSS: &str = "cumulated_discharge_capacity_loss";
/// Running sum of the charge capacity loss
pub const CUMULATED_CHARGE_CAPACITY_LOSS: &str = "cumulated_charge_capacity_loss";

/// Lower irreversible capacity level relative to the reference cycle
pub const LOW_LEVEL: &str = "low_level";
/// Upper irreversible capacity level relative to the reference cycle
pub const HIGH_LEVEL: &str = "high_level";

/// Cumulated relative irreversible capacity
pub const CUMULATED_RIC: &str = "cumulated_ric";
/// Cumulated relative irreversible capacity attributed to SEI formation
pub const CUMULATED_RIC_SEI: &str = "cumulated_ric_sei";
/// Cumulated relative irreversible capacity attributed to disconnection
pub const CUMULATED_RIC_DISCONNECT: &str = "cumulated_ric_disconnect";

/// Running sum of first minus second half-cycle capacity
pub const SHIFTED_CHARGE_CAPACITY: &str = "shifted_charge_capacity";
/// Shifted charge capacity plus the first half-cycle capacity
pub const SHIFTED_DISCHARGE_CAPACITY: &str = "shifted_discharge_capacity";

/// Last voltage of the last charge step
pub const END_VOLTAGE_CHARGE: &str = "end_voltage_charge";
/// Last voltage of the last discharge step
pub const END_VOLTAGE_DISCHARGE: &str = "end_voltage_discharge";
/// First internal resistance value of the first charge step
pub const IR_CHARGE: &str = "ir_charge";
/// First internal resistance value of the first discharge step
pub const IR_DISCHARGE: &str = "ir_discharge";

/// Minimum voltage of the first relaxation steps
pub const OCV_FIRST_MIN: &str = "ocv_first_min";
/// Maximum voltage of the first relaxation steps
pub const OCV_FIRST_MAX: &str = "ocv_first_max";
/// Minimum voltage of the second relaxation steps
pub const OCV_SECOND_MIN: &str = "ocv_second_min";
/// Maximum voltage of the second relaxation steps
pub const OCV_SECOND_MAX: &str = "ocv_second_max";
