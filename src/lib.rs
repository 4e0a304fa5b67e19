//! # cellPeak - Battery Cycling Data Pipeline
//!
//! `cellpeak` turns the raw time series of a galvanostatic cycling test into
//! derived tables and persists everything as a single `.cellpeak` artifact.
//!
//! ## Key Features
//!
//! - **Step classification**: every (cycle, step, sub-step) gets statistics
//!   of its measures and a step type such as `charge`, `discharge`, `rest`,
//!   `ocvrlx_up` or `ir`, either from built-in rules or from a user-supplied
//!   step specification.
//!
//! - **Per-cycle summary**: capacities, efficiencies, losses, cumulated
//!   values, specific capacities and optional OCV, end voltage and internal
//!   resistance columns.
//!
//! - **Capacity curves**: voltage versus capacity per cycle, stitched with
//!   the `back-and-forth`, `forth` or `forth-and-forth` methods.
//!
//! - **Merging**: several captures of one test are combined with monotonic
//!   data point and cycle numbering.
//!
//! - **Staleness check**: the artifact records size and timestamps of the raw
//!   files so it is only rebuilt when they change.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cellpeak::collection::{CellData, LoadCellOptions};
//! use cellpeak::config::PipelineConfig;
//! use std::path::Path;
//!
//! let mut cell = CellData::new(PipelineConfig::default());
//! cell.loadcell(
//!     &["cell_01.csv", "cell_02.csv"],
//!     Some(Path::new("cell.cellpeak")),
//!     Some(1.2),
//!     &LoadCellOptions::default(),
//! )?;
//! cell.make_step_table(None)?;
//! cell.make_summary_of(None)?;
//! cell.save("cell.cellpeak", false, false)?;
//! # Ok::<(), cellpeak::collection::CellDataError>(())
//! ```
//!
//! The artifact is a ZIP container:
//! ```text
//! cell.cellpeak
//! ├── mimetype                  # application/vnd.cellpeak (stored)
//! ├── info.json                 # dataset info, units, flags
//! ├── raw/raw.parquet           # raw measurements
//! ├── steps/steps.parquet       # step table (when made)
//! ├── summary/summary.parquet   # per-cycle summary (when made)
//! └── fid/fid.parquet           # raw file ids for the staleness check
//! ```
//!
//! ## Architecture
//!
//! - [`schema`]: Arrow schemas and artifact constants
//! - [`metadata`]: dataset info, units and raw file ids
//! - [`dataset`]: the dataset model and merging
//! - [`steps`]: step table construction and classification
//! - [`summary`]: per-cycle summary derivation
//! - [`curves`]: capacity curve extraction
//! - [`staleness`]: artifact versus raw file comparison
//! - [`loader`]: raw file loaders
//! - [`writer`] / [`reader`]: artifact persistence
//! - [`export`]: CSV export
//! - [`config`]: TOML pipeline configuration
//! - [`collection`]: the [`collection::CellData`] manager tying it together

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![allow(clippy::too_many_arguments)]

pub mod collection;
pub mod config;
pub mod curves;
pub mod dataset;
pub mod export;
pub mod loader;
pub mod metadata;
pub mod reader;
pub mod schema;
pub mod staleness;
pub mod steps;
pub mod summary;
pub mod synthetic;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::collection::{CellData, CellDataError, LoadCellOptions};
    pub use crate::config::PipelineConfig;
    pub use crate::curves::{get_cap, get_ccap, get_dcap, get_ocv, CurveMethod, CurveOptions};
    pub use crate::dataset::{merge, Dataset, RawRow, RawTable};
    pub use crate::export::{to_csv, ExportOptions};
    pub use crate::loader::{CsvLoader, Loader};
    pub use crate::metadata::{CycleMode, DatasetInfo, FileId, FileIdKey, RawLimits, RawUnits};
    pub use crate::reader::{ArtifactReader, ReaderError};
    pub use crate::schema::{CELLPEAK_EXTENSION, FILE_VERSION};
    pub use crate::staleness::{check_artifact, StalenessReport};
    pub use crate::steps::{make_step_table, StepSpecification, StepTable, StepType};
    pub use crate::summary::{make_summary, SummaryOptions, SummaryTable};
    pub use crate::writer::{ArtifactWriter, WriterStats};
}
