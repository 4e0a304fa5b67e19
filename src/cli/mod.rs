use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cellpeak::curves::CurveMethod;
use cellpeak::metadata::{CycleMode, FileIdKey};

mod check;
mod config;
mod demo;
mod export;
mod info;
mod process;

/// cellPeak - battery cycling data pipeline
#[derive(Parser)]
#[command(name = "cellpeak")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Which half-cycle comes first.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CycleModeArg {
    /// Discharge first (anode half-cells)
    Anode,
    /// Charge first (cathode half-cells)
    Cathode,
}

/// How charge and discharge curves are stitched.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum MethodArg {
    /// Second half-cycle runs back from where the first ended
    #[default]
    BackAndForth,
    /// Second half-cycle continues along the capacity axis
    Forth,
    /// Both half-cycles start at the shift
    ForthAndForth,
}

/// File attribute compared by the staleness check.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum KeyArg {
    /// File size in bytes
    #[default]
    Size,
    /// Last modification time
    Modified,
    /// Last access time
    Accessed,
}

impl From<CycleModeArg> for CycleMode {
    fn from(arg: CycleModeArg) -> Self {
        match arg {
            CycleModeArg::Anode => CycleMode::Anode,
            CycleModeArg::Cathode => CycleMode::Cathode,
        }
    }
}

impl From<MethodArg> for CurveMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::BackAndForth => CurveMethod::BackAndForth,
            MethodArg::Forth => CurveMethod::Forth,
            MethodArg::ForthAndForth => CurveMethod::ForthAndForth,
        }
    }
}

impl From<KeyArg> for FileIdKey {
    fn from(arg: KeyArg) -> Self {
        match arg {
            KeyArg::Size => FileIdKey::Size,
            KeyArg::Modified => FileIdKey::Modified,
            KeyArg::Accessed => FileIdKey::Accessed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load raw files, derive steps and summary, and save an artifact
    Process {
        /// Raw CSV exports, merged in the given order
        #[arg(value_name = "RAW", required = true)]
        raw: Vec<PathBuf>,

        /// Output artifact path
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        /// Active mass in mg
        #[arg(short, long)]
        mass: Option<f64>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Override the cycle mode from the config
        #[arg(long, value_enum)]
        cycle_mode: Option<CycleModeArg>,

        /// Existing artifact to reuse when it is up to date
        #[arg(long, value_name = "FILE")]
        artifact: Option<PathBuf>,

        /// Always load the raw files, ignoring any artifact
        #[arg(long)]
        force_raw: bool,

        /// Step type definitions replacing the built-in rules
        #[arg(long, value_name = "FILE")]
        step_spec: Option<PathBuf>,

        /// The step definition file has no cycle column
        #[arg(long, requires = "step_spec")]
        short_spec: bool,
    },

    /// Display information about a cellPeak artifact
    Info {
        /// Input artifact path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Check whether an artifact is up to date with its raw files
    Check {
        /// Artifact path
        #[arg(value_name = "ARTIFACT")]
        artifact: PathBuf,

        /// Raw files the artifact was made from
        #[arg(value_name = "RAW", required = true)]
        raw: Vec<PathBuf>,

        /// File attribute to compare
        #[arg(short, long, default_value = "size", value_enum)]
        key: KeyArg,
    },

    /// Export an artifact as CSV files
    Export {
        /// Input artifact path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory (defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Skip the raw table
        #[arg(long)]
        no_raw: bool,

        /// Skip the summary table
        #[arg(long)]
        no_summary: bool,

        /// Skip the step table
        #[arg(long)]
        no_steps: bool,

        /// Also write voltage versus capacity curves per cycle
        #[arg(long)]
        cycles: bool,

        /// Stitching method for the cycle curves
        #[arg(long, default_value = "back-and-forth", value_enum)]
        method: MethodArg,

        /// Capacity shift applied to the curves
        #[arg(long, default_value_t = 0.0)]
        shift: f64,

        /// Shift each cycle to start where the previous one ended
        #[arg(long)]
        shifted: bool,

        /// Last cycle to export
        #[arg(long)]
        last_cycle: Option<i32>,
    },

    /// Generate a synthetic cycling test and save it as an artifact
    Demo {
        /// Output artifact path
        #[arg(value_name = "OUTPUT", default_value = "demo_cell.cellpeak")]
        output: PathBuf,

        /// Number of cycles to generate
        #[arg(short, long, default_value_t = 10)]
        cycles: usize,

        /// Samples per step
        #[arg(short, long, default_value_t = 25)]
        points: usize,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            raw,
            output,
            mass,
            config,
            cycle_mode,
            artifact,
            force_raw,
            step_spec,
            short_spec,
        } => process::run(process::ProcessArgs {
            raw,
            output,
            mass,
            config,
            cycle_mode: cycle_mode.map(CycleMode::from),
            artifact,
            force_raw,
            step_spec,
            short_spec,
        }),
        Commands::Info { file } => info::run(file),
        Commands::Check { artifact, raw, key } => check::run(artifact, raw, FileIdKey::from(key)),
        Commands::Export {
            file,
            out_dir,
            config,
            no_raw,
            no_summary,
            no_steps,
            cycles,
            method,
            shift,
            shifted,
            last_cycle,
        } => export::run(export::ExportArgs {
            file,
            out_dir,
            config,
            raw: !no_raw,
            summary: !no_summary,
            steps: !no_steps,
            cycles,
            method: CurveMethod::from(method),
            shift,
            shifted,
            last_cycle,
        }),
        Commands::Demo {
            output,
            cycles,
            points,
        } => demo::run(output, cycles, points),
    }
}
