use serde::{Deserialize, Serialize};

/// Unit fractions of the raw instrument columns relative to SI.
///
/// Arbin instruments report current in A, capacity in Ah and expect the
/// mass in mg, hence the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUnits {
    /// Current unit fraction (1.0 = A)
    pub current: f64,
    /// Charge unit fraction (1.0 = Ah)
    pub charge: f64,
    /// Mass unit fraction (0.001 = mg)
    pub mass: f64,
}

impl Default for RawUnits {
    fn default() -> Self {
        Self::arbin()
    }
}

impl RawUnits {
    /// Units of Arbin exports
    pub fn arbin() -> Self {
        Self {
            current: 1.0,
            charge: 1.0,
            mass: 0.001,
        }
    }
}

/// Units the derived specific capacities are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetUnits {
    /// Charge unit fraction (0.001 = mAh)
    pub charge: f64,
    /// Specific mass unit fraction (1.0 = g)
    pub specific: f64,
}

impl Default for TargetUnits {
    fn default() -> Self {
        Self {
            charge: 0.001,
            specific: 1.0,
        }
    }
}

/// Factor converting a raw capacity into a specific capacity.
///
/// With the default units and the mass in mg the result is mAh/g, that is
/// `1e6 / mass`.
pub fn specific_converter(raw: &RawUnits, target: &TargetUnits, mass: f64) -> f64 {
    (raw.charge / raw.mass) / (target.charge / target.specific) / mass
}

/// Classification thresholds for one instrument family.
///
/// `*_hard` limits are absolute (current) or relative change in percent
/// (stable_*), as consumed by the step classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLimits {
    /// Below this the current is considered zero
    pub current_hard: f64,
    /// Soft zero current limit
    pub current_soft: f64,
    /// Relative current change considered stable
    pub stable_current_hard: f64,
    /// Relative current change threshold for a falling current
    pub stable_current_soft: f64,
    /// Relative voltage change considered stable
    pub stable_voltage_hard: f64,
    /// Soft relative voltage change limit
    pub stable_voltage_soft: f64,
    /// Relative capacity change meaning the capacity changed
    pub stable_charge_hard: f64,
    /// Soft relative capacity change limit
    pub stable_charge_soft: f64,
    /// Internal resistance change limit
    pub ir_change: f64,
}

impl Default for RawLimits {
    fn default() -> Self {
        Self::arbin()
    }
}

impl RawLimits {
    /// Limits tuned for Arbin instruments
    pub fn arbin() -> Self {
        Self {
            current_hard: 1e-13,
            current_soft: 1e-5,
            stable_current_hard: 2.0,
            stable_current_soft: 4.0,
            stable_voltage_hard: 2.0,
            stable_voltage_soft: 4.0,
            stable_charge_hard: 0.9,
            stable_charge_soft: 5.0,
            ir_change: 1e-5,
        }
    }

    /// Limits tuned for BioLogic instruments
    pub fn biologic() -> Self {
        Self {
            stable_charge_hard: 2.0,
            ..Self::arbin()
        }
    }
}
