//! Heuristic step classification as an ordered rule list.
//!
//! Rules are evaluated in order and the last matching rule wins.

use super::{StepRecord, StepType};
use crate::metadata::RawLimits;

/// Boolean features of one step derived from its aggregates and the limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepConditions {
    /// |I.max| + |I.min| below the hard current limit
    pub no_current: bool,
    /// Voltage rose more than the stable voltage limit
    pub voltage_up: bool,
    /// Voltage fell more than the stable voltage limit
    pub voltage_down: bool,
    /// Voltage change within the stable voltage limit
    pub voltage_stable: bool,
    /// Current fell more than the soft stable current limit
    pub current_down: bool,
    /// Mean current below the negative hard current limit
    pub current_negative: bool,
    /// Mean current above the hard current limit
    pub current_positive: bool,
    /// Charge capacity changed more than the stable charge limit
    pub charge_changed: bool,
    /// Discharge capacity changed more than the stable charge limit
    pub discharge_changed: bool,
    /// Voltage, current, charge and discharge did not change at all
    pub no_change: bool,
}

impl StepConditions {
    /// Evaluate the conditions of one step
    pub fn evaluate(record: &StepRecord, limits: &RawLimits) -> Self {
        let current = &record.current;
        let voltage = &record.voltage;

        Self {
            no_current: current.max.abs() + current.min.abs() < limits.current_hard,
            voltage_up: voltage.delta > limits.stable_voltage_hard,
            voltage_down: voltage.delta < -limits.stable_voltage_hard,
            voltage_stable: voltage.delta.abs() < limits.stable_voltage_hard,
            current_down: current.delta < -limits.stable_current_soft,
            current_negative: current.avr < -limits.current_hard,
            current_positive: current.avr > limits.current_hard,
            charge_changed: record.charge.delta.abs() > limits.stable_charge_hard,
            discharge_changed: record.discharge.delta.abs() > limits.stable_charge_hard,
            no_change: voltage.delta == 0.0
                && current.delta == 0.0
                && record.charge.delta == 0.0
                && record.discharge.delta == 0.0,
        }
    }
}

/// A labelled predicate over [`StepConditions`]
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Label assigned when the predicate holds
    pub label: StepType,
    /// Predicate
    pub predicate: fn(&StepConditions) -> bool,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("label", &self.label)
            .finish()
    }
}

/// The default rule list, in evaluation order
pub fn default_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule {
            label: StepType::Rest,
            predicate: |c| c.no_current && c.voltage_stable,
        },
        ClassificationRule {
            label: StepType::OcvrlxUp,
            predicate: |c| c.no_current && c.voltage_up,
        },
        ClassificationRule {
            label: StepType::OcvrlxDown,
            predicate: |c| c.no_current && c.voltage_down,
        },
        ClassificationRule {
            label: StepType::Discharge,
            predicate: |c| c.discharge_changed && c.current_negative,
        },
        ClassificationRule {
            label: StepType::Charge,
            predicate: |c| c.charge_changed && c.current_positive,
        },
        ClassificationRule {
            label: StepType::CvDischarge,
            predicate: |c| c.voltage_stable && c.current_negative && c.current_down,
        },
        ClassificationRule {
            label: StepType::CvCharge,
            predicate: |c| c.voltage_stable && c.current_positive && c.current_down,
        },
        ClassificationRule {
            label: StepType::Ir,
            predicate: |c| c.no_change,
        },
    ]
}

/// Label of the last matching rule, [`StepType::NotKnown`] when none matches
pub fn classify(conditions: &StepConditions, rules: &[ClassificationRule]) -> StepType {
    rules
        .iter()
        .rev()
        .find(|rule| (rule.predicate)(conditions))
        .map(|rule| rule.label)
        .unwrap_or(StepType::NotKnown)
}
