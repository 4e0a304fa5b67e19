/// Current artifact file version
pub const FILE_VERSION: u32 = 4;

/// Oldest artifact file version that can still be loaded
pub const MINIMUM_FILE_VERSION: u32 = 4;

/// File extension for cellpeak artifacts
pub const CELLPEAK_EXTENSION: &str = "cellpeak";

/// MIME type stored as the first entry of the artifact container
pub const CELLPEAK_MIMETYPE: &str = "application/vnd.cellpeak";

/// Metadata key for the file version in Parquet footers
pub const KEY_FILE_VERSION: &str = "cellpeak:file_version";

/// Metadata key for the table kind in Parquet footers
pub const KEY_TABLE_KIND: &str = "cellpeak:table";

/// Metadata key for the writer software in Parquet footers
pub const KEY_CONVERTER_INFO: &str = "cellpeak:converter_info";

/// Field metadata key carrying the physical unit of a column
pub const FIELD_UNIT: &str = "unit";

/// Container entry holding the mimetype
pub const ENTRY_MIMETYPE: &str = "mimetype";
/// Container entry holding dataset information
pub const ENTRY_INFO: &str = "info.json";
/// Container entry holding the raw table
pub const ENTRY_RAW: &str = "raw/raw.parquet";
/// Container entry holding the summary table
pub const ENTRY_SUMMARY: &str = "summary/summary.parquet";
/// Container entry holding the step table
pub const ENTRY_STEPS: &str = "steps/steps.parquet";
/// Container entry holding the raw file provenance table
pub const ENTRY_FID: &str = "fid/fid.parquet";
