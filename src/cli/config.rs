//! TOML configuration for the command line.
//!
//! Settings not given on the command line come from a config file:
//!
//! ```toml
//! # cellpeak.toml
//! [reader]
//! cycle_mode = "cathode"
//! sep = ";"
//!
//! [summary]
//! find_ir = false
//! ```

use anyhow::{Context, Result};
use std::path::Path;

use cellpeak::config::PipelineConfig;
use cellpeak::metadata::CycleMode;

/// Load the pipeline config, falling back to defaults without a file.
pub fn load(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

/// Apply command line overrides on top of a loaded config.
pub fn apply_overrides(config: &mut PipelineConfig, cycle_mode: Option<CycleMode>) {
    if let Some(cycle_mode) = cycle_mode {
        config.reader.cycle_mode = cycle_mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_without_file() {
        let config = load(None).unwrap();
        assert_eq!(config.reader.cycle_mode, CycleMode::Anode);
        assert_eq!(config.reader.max_merge_files, 10);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[reader]\ncycle_mode = \"cathode\"\nsep = \";\"").unwrap();
        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.reader.cycle_mode, CycleMode::Cathode);
        assert_eq!(config.reader.separator().unwrap(), b';');
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Some(Path::new("/nonexistent/cellpeak.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config file"));
    }

    #[test]
    fn test_cycle_mode_override() {
        let mut config = PipelineConfig::default();
        apply_overrides(&mut config, None);
        assert_eq!(config.reader.cycle_mode, CycleMode::Anode);
        apply_overrides(&mut config, Some(CycleMode::Cathode));
        assert_eq!(config.reader.cycle_mode, CycleMode::Cathode);
    }
}
