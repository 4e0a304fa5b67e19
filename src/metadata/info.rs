use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::MetadataError;

/// Which half-cycle comes first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleMode {
    /// Discharge (lithiation) is the first half-cycle
    #[default]
    Anode,
    /// Charge is the first half-cycle
    Cathode,
}

impl FromStr for CycleMode {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anode" => Ok(Self::Anode),
            "cathode" => Ok(Self::Cathode),
            other => Err(MetadataError::InvalidCycleMode(other.to_string())),
        }
    }
}

impl fmt::Display for CycleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anode => f.write_str("anode"),
            Self::Cathode => f.write_str("cathode"),
        }
    }
}

/// Default mass (mg) used until the real one is set
pub const DEFAULT_MASS: f64 = 1.0;

/// Descriptive information about one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetInfo {
    /// Test name, usually the raw file stem
    pub name: String,

    /// Path the test was loaded from
    pub loaded_from: Option<String>,

    /// Active material mass in the raw mass unit (mg by default)
    pub mass: f64,

    /// Whether `mass` was set explicitly
    pub mass_given: bool,

    /// Total electrode mass
    pub tot_mass: f64,

    /// Nominal capacity
    pub nom_cap: f64,

    /// Wall clock time of the first sample
    pub start_datetime: Option<NaiveDateTime>,

    /// Instrument test identifier
    pub test_id: Option<i64>,

    /// Instrument channel index
    pub channel_index: Option<i64>,

    /// Instrument channel number
    pub channel_number: Option<i64>,

    /// Operator name
    pub creator: Option<String>,

    /// Instrument schedule file
    pub schedule_file_name: Option<String>,
}

impl Default for DatasetInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            loaded_from: None,
            mass: DEFAULT_MASS,
            mass_given: false,
            tot_mass: DEFAULT_MASS,
            nom_cap: 3579.0,
            start_datetime: None,
            test_id: None,
            channel_index: None,
            channel_number: None,
            creator: None,
            schedule_file_name: None,
        }
    }
}

impl DatasetInfo {
    /// Create info for a named test
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the active material mass
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.mass_given = true;
    }
}

fn excel_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// Convert an Excel serial day number into a timestamp.
pub fn xldate_to_datetime(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    let millis = (days * 86_400_000.0).round() as i64;
    excel_epoch()?.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

/// Convert a timestamp into an Excel serial day number.
pub fn datetime_to_xldate(datetime: NaiveDateTime) -> f64 {
    match excel_epoch() {
        Some(epoch) => (datetime - epoch).num_milliseconds() as f64 / 86_400_000.0,
        None => f64::NAN,
    }
}

/// Seconds between two optional start times, `None` when either is unknown.
pub fn seconds_between(
    earlier: Option<NaiveDateTime>,
    later: Option<NaiveDateTime>,
) -> Option<f64> {
    let (earlier, later) = (earlier?, later?);
    Some((later - earlier).num_milliseconds() as f64 / 1000.0)
}
