use std::collections::HashMap;

use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;
use serde::{Deserialize, Serialize};

use crate::schema::{columns, step_columns};

/// Codec of the Parquet tables inside an artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionType {
    /// ZSTD at [`WriterConfig::zstd_level`]
    #[default]
    Zstd,
    /// Snappy
    Snappy,
    /// No compression
    None,
}

/// Configuration of the artifact writer, the `[writer]` config section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Codec of every table
    pub compression: CompressionType,

    /// ZSTD level (1-22)
    pub zstd_level: i32,

    /// Rows per row group of the raw table
    pub row_group_size: usize,

    /// Whether to write column statistics
    pub write_statistics: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::Zstd,
            zstd_level: 3,
            row_group_size: 100_000,
            write_statistics: true,
        }
    }
}

impl WriterConfig {
    fn codec(&self) -> Compression {
        match self.compression {
            CompressionType::Zstd => {
                Compression::ZSTD(ZstdLevel::try_new(self.zstd_level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::None => Compression::UNCOMPRESSED,
        }
    }

    /// Parquet properties for one table, `metadata` goes to the footer
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(self.codec())
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1));

        // indices and labels repeat for every sample of a step
        for col in [
            columns::STEP_INDEX,
            columns::CYCLE_INDEX,
            columns::SUB_STEP_INDEX,
            step_columns::TYPE,
            step_columns::INFO,
        ] {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![col.to_string()]), true);
        }
        for col in [
            columns::TEST_TIME,
            columns::STEP_TIME,
            columns::CURRENT,
            columns::VOLTAGE,
            columns::CHARGE_CAPACITY,
            columns::DISCHARGE_CAPACITY,
        ] {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![col.to_string()]), false);
        }

        let mut footer: Vec<KeyValue> = metadata
            .iter()
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
            .collect();
        footer.sort_by(|a, b| a.key.cmp(&b.key));
        builder.set_key_value_metadata(Some(footer)).build()
    }
}
