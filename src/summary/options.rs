use crate::metadata::{CycleMode, TargetUnits};

/// Default reference cycle for the irreversible capacity levels
pub const DEFAULT_DANIEL_NUMBER: i32 = 5;

/// Options of the summary engine
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    /// Which half-cycle comes first
    pub cycle_mode: CycleMode,
    /// Reference cycle for `low_level` / `high_level`
    pub daniel_number: i32,
    /// Units of the specific capacities
    pub target_units: TargetUnits,
    /// Add open circuit voltage columns
    pub find_ocv: bool,
    /// Add internal resistance columns
    pub find_ir: bool,
    /// Add end voltage columns
    pub find_end_voltage: bool,
    /// Select rows from externally supplied statistics when available
    pub use_stat_rows: bool,
    /// Add a formatted date column
    pub convert_date: bool,
    /// Make the step table first even when no augmentation needs it
    pub ensure_step_table: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            cycle_mode: CycleMode::Anode,
            daniel_number: DEFAULT_DANIEL_NUMBER,
            target_units: TargetUnits::default(),
            find_ocv: false,
            find_ir: true,
            find_end_voltage: true,
            use_stat_rows: false,
            convert_date: true,
            ensure_step_table: false,
        }
    }
}

impl SummaryOptions {
    /// Only the derived capacity metrics, no step table lookups
    pub fn minimal() -> Self {
        Self {
            find_ocv: false,
            find_ir: false,
            find_end_voltage: false,
            convert_date: false,
            ..Default::default()
        }
    }

    /// Every augmentation enabled
    pub fn full() -> Self {
        Self {
            find_ocv: true,
            find_ir: true,
            find_end_voltage: true,
            ensure_step_table: true,
            ..Default::default()
        }
    }

    /// Whether the step table is needed
    pub fn needs_step_table(&self) -> bool {
        self.ensure_step_table || self.find_ocv || self.find_ir || self.find_end_voltage
    }
}
