use anyhow::{Context, Result};
use std::path::PathBuf;

use cellpeak::reader::ArtifactReader;

/// Display information about a cellPeak artifact
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let mut reader = ArtifactReader::open(&file).context("Failed to open artifact")?;
    let manifest = reader.info().clone();

    println!("cellPeak Artifact Information");
    println!("=============================");
    println!("File: {}", file.display());
    println!("Format version: {}", manifest.file_version);
    println!("Written by: {}", manifest.converter);
    println!();

    println!("Entries:");
    for entry in reader.entries() {
        println!("  {}", entry);
    }
    println!();

    let info = &manifest.info;
    println!("Cell:");
    println!("  Name: {}", info.name);
    println!(
        "  Mass: {} mg{}",
        info.mass,
        if info.mass_given { "" } else { " (default)" }
    );
    println!("  Nominal capacity: {} mAh/g", info.nom_cap);
    if let Some(start) = info.start_datetime {
        println!("  Started: {}", start);
    }
    if let Some(loaded_from) = &info.loaded_from {
        println!("  Loaded from: {}", loaded_from);
    }
    println!();

    let raw = reader.read_raw().context("Failed to read raw table")?;
    println!("Tables:");
    println!("  Raw rows: {}", raw.len());
    println!("  Cycles: {}", raw.max_cycle().unwrap_or(0));
    match reader.read_steps().context("Failed to read step table")? {
        Some(steps) => println!("  Steps: {}", steps.len()),
        None => println!("  Steps: not made"),
    }
    match reader.read_summary().context("Failed to read summary")? {
        Some(summary) => println!(
            "  Summary: {} rows, {} columns",
            summary.len(),
            summary.column_names().len()
        ),
        None => println!("  Summary: not made"),
    }
    println!();

    println!("Raw files{}:", if manifest.merged { " (merged)" } else { "" });
    match reader.read_file_ids().context("Failed to read file ids")? {
        Some(file_ids) if !file_ids.is_empty() => {
            for (file_id, rows) in file_ids.iter().zip(
                manifest
                    .raw_data_files_length
                    .iter()
                    .map(Some)
                    .chain(std::iter::repeat(None)),
            ) {
                match rows {
                    Some(rows) => println!(
                        "  {} ({} bytes, {} rows)",
                        file_id.full_name, file_id.size, rows
                    ),
                    None => println!("  {} ({} bytes)", file_id.full_name, file_id.size),
                }
            }
        }
        _ => println!("  <none recorded>"),
    }

    Ok(())
}
