//! # cellPeak command line
//!
//! Turns raw battery cycling exports into `.cellpeak` artifacts and back.
//!
//! ## Usage
//!
//! ```bash
//! # Process raw files into an artifact
//! cellpeak process cell_01.csv cell_02.csv -o cell.cellpeak --mass 1.2
//!
//! # Check whether the artifact still matches the raw files
//! cellpeak check cell.cellpeak cell_01.csv cell_02.csv
//!
//! # Export the tables and per-cycle curves as CSV
//! cellpeak export cell.cellpeak --out-dir out --cycles
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    dispatch(cli)
}
