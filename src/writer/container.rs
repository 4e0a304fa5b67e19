use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use arrow::record_batch::RecordBatch;
use log::{debug, info, warn};
use parquet::arrow::ArrowWriter;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::batches::{fid_to_batch, raw_to_batch, steps_to_batch, summary_to_batch};
use super::{WriterConfig, WriterError, WriterStats};
use crate::dataset::Dataset;
use crate::schema::{
    ArtifactInfo, CELLPEAK_MIMETYPE, ENTRY_FID, ENTRY_INFO, ENTRY_MIMETYPE, ENTRY_RAW,
    ENTRY_STEPS, ENTRY_SUMMARY, FILE_VERSION, KEY_CONVERTER_INFO, KEY_FILE_VERSION,
    KEY_TABLE_KIND,
};
use crate::summary::SummaryTable;

/// Writer for `.cellpeak` artifacts.
///
/// The container is assembled in a temporary file next to the target and
/// moved into place once complete, so an interrupted save never leaves a
/// truncated artifact behind.
#[derive(Debug, Clone, Default)]
pub struct ArtifactWriter {
    config: WriterConfig,
}

impl ArtifactWriter {
    /// Writer with the given configuration
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Encode one table as a Parquet file in memory
    fn encode_table(&self, batch: &RecordBatch, kind: &str) -> Result<Vec<u8>, WriterError> {
        let mut metadata = HashMap::new();
        metadata.insert(KEY_FILE_VERSION.to_string(), FILE_VERSION.to_string());
        metadata.insert(KEY_TABLE_KIND.to_string(), kind.to_string());
        metadata.insert(
            KEY_CONVERTER_INFO.to_string(),
            format!("cellpeak {}", env!("CARGO_PKG_VERSION")),
        );
        let props = self.config.to_writer_properties(&metadata);

        let mut writer = ArrowWriter::try_new(Vec::new(), batch.schema(), Some(props))?;
        writer.write(batch)?;
        Ok(writer.into_inner()?)
    }

    /// Save a dataset.
    ///
    /// Fails with [`WriterError::SummaryNotMade`] unless the summary is made
    /// or `force` is set; a forced save stores an empty summary table.
    pub fn save<P: AsRef<Path>>(
        &self,
        dataset: &Dataset,
        path: P,
        force: bool,
    ) -> Result<WriterStats, WriterError> {
        let path = path.as_ref();
        let raw = dataset.raw().map_err(|_| WriterError::EmptyDataset)?;
        if !dataset.summary_made() {
            if !force {
                return Err(WriterError::SummaryNotMade);
            }
            warn!("Saving '{}' without a summary", dataset.info.name);
        }

        let mut artifact_info = ArtifactInfo::new(
            dataset.info.clone(),
            dataset.raw_units,
            dataset.raw_limits,
        );
        artifact_info.raw_data_files_length = dataset.raw_data_files_length.clone();
        artifact_info.merged = dataset.merged;
        artifact_info.step_table_made = dataset.step_table_made();
        artifact_info.summary_made = dataset.summary_made();
        artifact_info.stat_data_points = dataset.stat_data_points.clone();
        let info_json = artifact_info.to_json()?;

        let raw_data = self.encode_table(&raw_to_batch(raw)?, "raw")?;
        let empty_summary = SummaryTable::default();
        let summary = dataset.summary.as_ref().unwrap_or(&empty_summary);
        let summary_data = self.encode_table(&summary_to_batch(summary)?, "summary")?;
        let steps_data = match &dataset.steps {
            Some(steps) => Some(self.encode_table(&steps_to_batch(steps)?, "steps")?),
            None => None,
        };
        let fid_data = if dataset.raw_data_files.is_empty() {
            None
        } else {
            let batch = fid_to_batch(&dataset.raw_data_files, &dataset.raw_data_files_length)?;
            Some(self.encode_table(&batch, "fid")?)
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = NamedTempFile::new_in(parent)?;

        {
            let mut zip_writer = ZipWriter::new(BufWriter::new(tmp.as_file_mut()));

            // mimetype goes first and uncompressed
            let stored = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Stored)
                .unix_permissions(0o644);
            let deflated = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644);

            zip_writer.start_file(ENTRY_MIMETYPE, stored)?;
            zip_writer.write_all(CELLPEAK_MIMETYPE.as_bytes())?;

            zip_writer.start_file(ENTRY_INFO, deflated)?;
            zip_writer.write_all(info_json.as_bytes())?;

            // Parquet entries stay stored so they can be read without inflating
            zip_writer.start_file(ENTRY_RAW, stored)?;
            zip_writer.write_all(&raw_data)?;

            zip_writer.start_file(ENTRY_SUMMARY, stored)?;
            zip_writer.write_all(&summary_data)?;

            if let Some(data) = &steps_data {
                zip_writer.start_file(ENTRY_STEPS, stored)?;
                zip_writer.write_all(data)?;
            }
            if let Some(data) = &fid_data {
                zip_writer.start_file(ENTRY_FID, stored)?;
                zip_writer.write_all(data)?;
            }

            let inner = zip_writer.finish()?;
            inner.into_inner().map_err(|e| {
                WriterError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to flush ZIP buffer: {}", e.error()),
                ))
            })?;
        }

        tmp.persist(path).map_err(|e| e.error)?;
        debug!("Persisted artifact to {}", path.display());

        let stats = WriterStats {
            raw_rows: raw.len(),
            step_rows: dataset.steps.as_ref().map_or(0, |s| s.len()),
            summary_rows: dataset.summary.as_ref().map_or(0, |s| s.len()),
            file_ids: dataset.raw_data_files.len(),
            file_size_bytes: fs::metadata(path)?.len(),
        };
        info!("{}", stats);
        Ok(stats)
    }
}
