use std::collections::BTreeMap;

use super::{StepError, StepTable, StepType};

/// Resolve a selector into step types.
///
/// Besides the type labels the helpers `ocv` (both relaxation directions)
/// and `charge_discharge` are accepted. With `all_ctypes` the constant
/// voltage variants of charge and discharge are added.
pub fn resolve_step_types(selector: &str, all_ctypes: bool) -> Result<Vec<StepType>, StepError> {
    let selector = selector.trim().to_ascii_lowercase();
    let mut types = match selector.as_str() {
        "ocv" => vec![StepType::OcvrlxUp, StepType::OcvrlxDown],
        "charge_discharge" => vec![StepType::Charge, StepType::Discharge],
        other => vec![other.parse::<StepType>()?],
    };

    if all_ctypes {
        let mut extra = Vec::new();
        for step_type in &types {
            match step_type {
                StepType::Charge => extra.extend([StepType::ChargeCv, StepType::CvCharge]),
                StepType::Discharge => {
                    extra.extend([StepType::DischargeCv, StepType::CvDischarge])
                }
                _ => {}
            }
        }
        types.extend(extra);
    }
    Ok(types)
}

impl StepTable {
    /// Step numbers of the selected types, per cycle.
    ///
    /// Cycles without a matching step map to `[0]`. When `cycle` is given
    /// only that cycle is reported.
    pub fn step_numbers(
        &self,
        selector: &str,
        all_ctypes: bool,
        cycle: Option<i32>,
    ) -> Result<BTreeMap<i32, Vec<i32>>, StepError> {
        let types = resolve_step_types(selector, all_ctypes)?;
        let cycles = match cycle {
            Some(c) => vec![c],
            None => self.cycles(),
        };

        let mut out = BTreeMap::new();
        for c in cycles {
            let mut steps = Vec::new();
            for step_type in &types {
                steps.extend(
                    self.records
                        .iter()
                        .filter(|r| r.cycle == c && r.step_type == Some(*step_type))
                        .map(|r| r.step),
                );
            }
            if steps.is_empty() {
                steps.push(0);
            }
            out.insert(c, steps);
        }
        Ok(out)
    }
}
