use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StepError;

/// Electrochemical type of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    /// No current, stable voltage
    Rest,
    /// Galvanostatic charge
    Charge,
    /// Galvanostatic discharge
    Discharge,
    /// Constant voltage charge
    CvCharge,
    /// Constant voltage discharge
    CvDischarge,
    /// Charge followed by a constant voltage hold
    ChargeCv,
    /// Discharge followed by a constant voltage hold
    DischargeCv,
    /// Open circuit relaxation with rising voltage
    OcvrlxUp,
    /// Open circuit relaxation with falling voltage
    OcvrlxDown,
    /// Internal resistance measurement
    Ir,
    /// No rule matched
    NotKnown,
}

impl StepType {
    /// Every step type, in vocabulary order
    pub const ALL: [StepType; 11] = [
        StepType::Rest,
        StepType::Charge,
        StepType::Discharge,
        StepType::CvCharge,
        StepType::CvDischarge,
        StepType::ChargeCv,
        StepType::DischargeCv,
        StepType::OcvrlxUp,
        StepType::OcvrlxDown,
        StepType::Ir,
        StepType::NotKnown,
    ];

    /// Label used in tables and specification files
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Rest => "rest",
            StepType::Charge => "charge",
            StepType::Discharge => "discharge",
            StepType::CvCharge => "cv_charge",
            StepType::CvDischarge => "cv_discharge",
            StepType::ChargeCv => "charge_cv",
            StepType::DischargeCv => "discharge_cv",
            StepType::OcvrlxUp => "ocvrlx_up",
            StepType::OcvrlxDown => "ocvrlx_down",
            StepType::Ir => "ir",
            StepType::NotKnown => "not_known",
        }
    }
}

impl FromStr for StepType {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        StepType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == label)
            .ok_or(StepError::UnknownStepType(label))
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
