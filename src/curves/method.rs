use std::fmt;
use std::str::FromStr;

use log::warn;

/// How the two half-cycles of consecutive cycles are laid out on the
/// capacity axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveMethod {
    /// The second half-cycle runs back from where the first one ended
    #[default]
    BackAndForth,
    /// The second half-cycle continues along the axis
    Forth,
    /// Both half-cycles start at the shift
    ForthAndForth,
}

impl CurveMethod {
    /// All methods
    pub const ALL: [CurveMethod; 3] = [
        CurveMethod::BackAndForth,
        CurveMethod::Forth,
        CurveMethod::ForthAndForth,
    ];

    /// Method name
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveMethod::BackAndForth => "back-and-forth",
            CurveMethod::Forth => "forth",
            CurveMethod::ForthAndForth => "forth-and-forth",
        }
    }

    /// Parse a method name, falling back to back-and-forth with a warning
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(
                "Method '{}' is not a valid option, using '{}'",
                name,
                CurveMethod::BackAndForth
            );
            CurveMethod::BackAndForth
        })
    }
}

impl FromStr for CurveMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        CurveMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| format!("unknown curve method '{}'", s))
    }
}

impl fmt::Display for CurveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
