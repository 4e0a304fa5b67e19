use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use cellpeak::steps::make_step_table;
use cellpeak::summary::{make_summary, SummaryOptions};
use cellpeak::synthetic::SyntheticCell;
use cellpeak::writer::ArtifactWriter;

/// Generate a synthetic cycling test and save it as an artifact
pub fn run(output: PathBuf, cycles: usize, points: usize) -> Result<()> {
    info!("cellPeak - synthetic cycling demo");
    info!("=================================");

    if cycles == 0 {
        anyhow::bail!("At least one cycle is needed");
    }

    let cell = SyntheticCell {
        cycles,
        points_per_step: points,
        ..Default::default()
    };
    info!(
        "Generating {} cycles with {} points per step...",
        cycles, cell.points_per_step
    );
    let mut dataset = cell.build_dataset("demo_cell");

    make_step_table(&mut dataset, None).context("Failed to make step table")?;
    make_summary(&mut dataset, &SummaryOptions::default()).context("Failed to make summary")?;

    info!("Creating cellPeak artifact: {}", output.display());
    let stats = ArtifactWriter::default()
        .save(&dataset, &output, false)
        .context("Failed to write artifact")?;

    println!("{}", stats);
    println!("Demo artifact written to {}", output.display());
    Ok(())
}
