use crate::config::ConfigError;
use crate::curves::CurveError;
use crate::dataset::DatasetError;
use crate::export::ExportError;
use crate::loader::LoaderError;
use crate::metadata::MetadataError;
use crate::reader::ReaderError;
use crate::steps::StepError;
use crate::summary::SummaryError;
use crate::writer::WriterError;

/// Errors that can occur in [`CellData`](super::CellData) operations
#[derive(Debug, thiserror::Error)]
pub enum CellDataError {
    /// Raw file loading failed
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Dataset operation failed
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Step classification failed
    #[error(transparent)]
    Step(#[from] StepError),

    /// Summary derivation failed
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// Curve extraction failed
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Reading an artifact failed
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// Writing an artifact failed
    #[error(transparent)]
    Writer(#[from] WriterError),

    /// CSV export failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Metadata handling failed
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// No raw files were given
    #[error("No raw files given")]
    NoRawFiles,
}
