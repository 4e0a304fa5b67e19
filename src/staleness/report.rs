use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::metadata::FileIdKey;

/// Outcome of one staleness check
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    /// The file matches its recorded id
    Ok,
    /// Suspicious but not decisive on its own
    Warning(String),
    /// The file differs from the recorded id
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_warning(&self) -> bool {
        matches!(self, CheckStatus::Warning(_))
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// One line of a [`StalenessReport`]
#[derive(Debug, Clone, PartialEq)]
pub struct FileCheck {
    /// File or artifact part the check is about
    pub name: String,
    /// Result of the check
    pub status: CheckStatus,
}

impl FileCheck {
    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Whether an artifact still reflects its raw files, with the checks behind it
#[derive(Debug, Clone)]
pub struct StalenessReport {
    /// Artifact the raw files were compared against
    pub artifact: String,
    /// File id attribute that was compared
    pub key: FileIdKey,
    /// Individual checks
    pub checks: Vec<FileCheck>,
    /// The decision: `true` when the artifact can be reused
    pub up_to_date: bool,
}

impl StalenessReport {
    /// Empty report, stale until decided otherwise
    pub fn new(artifact: impl Into<String>, key: FileIdKey) -> Self {
        Self {
            artifact: artifact.into(),
            key,
            checks: Vec::new(),
            up_to_date: false,
        }
    }

    /// Add a check result
    pub fn add_check(&mut self, check: FileCheck) {
        self.checks.push(check);
    }

    /// Whether the artifact must be rebuilt from the raw files
    pub fn is_stale(&self) -> bool {
        !self.up_to_date
    }

    /// Count of passed checks
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Count of warnings
    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_warning()).count()
    }

    /// Count of failed checks
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("cellpeak Staleness Check").bold().cyan()));
            output.push_str(&format!("{}\n", style("========================").cyan()));
            output.push_str(&format!("{}: {}\n", style("Artifact").bold(), self.artifact));
            output.push_str(&format!("{}: {}\n\n", style("Key").bold(), self.key));

            for check in &self.checks {
                let (symbol, color_fn): (_, fn(&str) -> console::StyledObject<&str>) =
                    match &check.status {
                        CheckStatus::Ok => (OK, |s| style(s).green()),
                        CheckStatus::Warning(_) => (WARN, |s| style(s).yellow()),
                        CheckStatus::Failed(_) => (FAIL, |s| style(s).red()),
                    };
                output.push_str(&format!("[{}] {}", symbol, color_fn(&check.name)));
                match &check.status {
                    CheckStatus::Ok => output.push('\n'),
                    CheckStatus::Warning(msg) => {
                        output.push_str(&format!(" - {}: {}\n", style("WARNING").yellow().bold(), msg));
                    }
                    CheckStatus::Failed(msg) => {
                        output.push_str(&format!(" - {}: {}\n", style("CHANGED").red().bold(), msg));
                    }
                }
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} unchanged, {} warnings, {} changed\n\n",
                style("Summary").bold(),
                style(self.success_count()).green(),
                style(self.warning_count()).yellow(),
                style(self.failure_count()).red()
            ));
            if self.up_to_date {
                output.push_str(&format!("{}\n", style("Artifact is UP TO DATE").green().bold()));
            } else {
                output.push_str(&format!("{}\n", style("Artifact is STALE").red().bold()));
            }
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for StalenessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cellpeak Staleness Check")?;
        writeln!(f, "========================")?;
        writeln!(f, "Artifact: {}", self.artifact)?;
        writeln!(f, "Key: {}", self.key)?;
        writeln!(f)?;

        for check in &self.checks {
            let symbol = match &check.status {
                CheckStatus::Ok => "✓",
                CheckStatus::Warning(_) => "⚠",
                CheckStatus::Failed(_) => "✗",
            };
            write!(f, "[{}] {}", symbol, check.name)?;
            match &check.status {
                CheckStatus::Ok => writeln!(f)?,
                CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                CheckStatus::Failed(msg) => writeln!(f, " - CHANGED: {}", msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} unchanged, {} warnings, {} changed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;
        writeln!(f)?;
        if self.up_to_date {
            writeln!(f, "Artifact is UP TO DATE")
        } else {
            writeln!(f, "Artifact is STALE")
        }
    }
}
