//! # cellpeak Writer Module
//!
//! Persists a [`Dataset`](crate::dataset::Dataset) as a single `.cellpeak`
//! file: a ZIP container with one Parquet file per table.
//!
//! ```text
//! example.cellpeak
//! ├── mimetype                  (stored, first entry)
//! ├── info.json                 (deflated)
//! ├── raw/raw.parquet           (stored)
//! ├── summary/summary.parquet   (stored)
//! ├── steps/steps.parquet       (stored, when the step table is made)
//! └── fid/fid.parquet           (stored, when raw files are recorded)
//! ```
//!
//! Every Parquet footer carries the file version and the table kind.

mod batches;
mod config;
mod container;
mod error;
mod stats;


pub use batches::{fid_to_batch, raw_to_batch, steps_to_batch, summary_to_batch};
pub use config::{CompressionType, WriterConfig};
pub use container::ArtifactWriter;
pub use error::WriterError;
pub use stats::WriterStats;
