use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use cellpeak::collection::{CellData, LoadCellOptions};
use cellpeak::metadata::CycleMode;

/// Arguments of the process command
pub struct ProcessArgs {
    pub raw: Vec<PathBuf>,
    pub output: PathBuf,
    pub mass: Option<f64>,
    pub config: Option<PathBuf>,
    pub cycle_mode: Option<CycleMode>,
    pub artifact: Option<PathBuf>,
    pub force_raw: bool,
    pub step_spec: Option<PathBuf>,
    pub short_spec: bool,
}

/// Load raw files (or an up to date artifact), derive tables and save
pub fn run(args: ProcessArgs) -> Result<()> {
    for file in &args.raw {
        if !file.exists() {
            anyhow::bail!("Raw file does not exist: {}", file.display());
        }
    }

    let mut config = super::config::load(args.config.as_deref())?;
    super::config::apply_overrides(&mut config, args.cycle_mode);
    let ensure_step_table = config.reader.ensure_step_table;

    let mut cell = CellData::new(config);
    if let Some(spec) = &args.step_spec {
        cell.load_step_specifications(spec, args.short_spec)
            .with_context(|| format!("Failed to load step specifications: {}", spec.display()))?;
    }

    let options = LoadCellOptions {
        force_raw: args.force_raw,
        summary_on_raw: false,
    };
    let reused = cell
        .loadcell(&args.raw, args.artifact.as_deref(), args.mass, &options)
        .context("Failed to load cell")?;
    if !cell.check() {
        anyhow::bail!("No data points found in {} raw file(s)", args.raw.len());
    }

    if reused {
        info!("Artifact is up to date, reusing it");
        if let Some(mass) = args.mass {
            cell.set_mass(mass, None);
        }
    }

    cell.make_step_table(None)
        .context("Failed to make step table")?;
    cell.make_summary_of(None)
        .context("Failed to make summary")?;

    let stats = cell
        .save(&args.output, false, ensure_step_table)
        .context("Failed to save artifact")?;

    println!("cellPeak Processing");
    println!("===================");
    println!("Output: {}", args.output.display());
    if reused {
        println!("Source: artifact (up to date)");
    } else {
        println!("Source: {} raw file(s)", args.raw.len());
    }
    if let Some(cycles) = cell.get_number_of_cycles(None) {
        println!("Cycles: {}", cycles);
    }
    if let Some(stats) = stats {
        println!("{}", stats);
    }
    Ok(())
}
