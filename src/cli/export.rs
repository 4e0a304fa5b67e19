use anyhow::{Context, Result};
use std::path::PathBuf;

use cellpeak::collection::CellData;
use cellpeak::curves::CurveMethod;
use cellpeak::export::ExportOptions;

/// Arguments of the export command
pub struct ExportArgs {
    pub file: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub raw: bool,
    pub summary: bool,
    pub steps: bool,
    pub cycles: bool,
    pub method: CurveMethod,
    pub shift: f64,
    pub shifted: bool,
    pub last_cycle: Option<i32>,
}

/// Export an artifact as CSV files
pub fn run(args: ExportArgs) -> Result<()> {
    if !args.file.exists() {
        anyhow::bail!("File does not exist: {}", args.file.display());
    }
    let out_dir = args.out_dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let config = super::config::load(args.config.as_deref())?;
    let sep = config
        .reader
        .separator()
        .context("Invalid separator in config")?;

    let mut cell = CellData::new(config);
    cell.load(&args.file).context("Failed to load artifact")?;

    let options = ExportOptions {
        sep,
        raw: args.raw,
        summary: args.summary,
        steps: args.steps,
        cycles: args.cycles,
        shifted: args.shifted,
        method: args.method,
        shift: args.shift,
        last_cycle: args.last_cycle,
    };
    let written = cell
        .to_csv(&out_dir, &options)
        .context("Failed to export CSV files")?;

    println!("cellPeak CSV Export");
    println!("===================");
    println!("Input: {}", args.file.display());
    if written.is_empty() {
        println!("Nothing written");
    }
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}
