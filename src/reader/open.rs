use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use zip::ZipArchive;

use super::{ArtifactReader, ReaderError};
use crate::schema::{
    ArtifactInfo, ENTRY_INFO, FILE_VERSION, KEY_FILE_VERSION, MINIMUM_FILE_VERSION,
};

fn check_version(found: u32) -> Result<(), ReaderError> {
    if !(MINIMUM_FILE_VERSION..=FILE_VERSION).contains(&found) {
        return Err(ReaderError::WrongFileVersion {
            found,
            minimum: MINIMUM_FILE_VERSION,
            maximum: FILE_VERSION,
        });
    }
    Ok(())
}

fn read_entry(
    archive: &mut ZipArchive<BufReader<File>>,
    name: &str,
) -> Result<Option<Bytes>, ReaderError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut data = Vec::new();
    entry.read_to_end(&mut data)?;
    Ok(Some(Bytes::from(data)))
}

impl ArtifactReader {
    /// Open a `.cellpeak` artifact and check its version
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let json = read_entry(&mut archive, ENTRY_INFO)?
            .ok_or_else(|| ReaderError::CorruptArtifact(format!("missing {}", ENTRY_INFO)))?;
        let json = std::str::from_utf8(&json)
            .map_err(|e| ReaderError::CorruptArtifact(format!("{}: {}", ENTRY_INFO, e)))?;
        let info = ArtifactInfo::from_json(json)?;
        check_version(info.file_version)?;
        debug!(
            "Opened {} (file version {})",
            path.display(),
            info.file_version
        );
        Ok(Self {
            path,
            archive,
            info,
        })
    }

    /// Bytes of a container entry, `None` when the entry does not exist
    pub(super) fn read_entry(&mut self, name: &str) -> Result<Option<Bytes>, ReaderError> {
        read_entry(&mut self.archive, name)
    }

    /// Record batches of a Parquet entry, `None` when the entry does not exist
    pub(super) fn read_batches(
        &mut self,
        name: &str,
    ) -> Result<Option<Vec<RecordBatch>>, ReaderError> {
        let bytes = match self.read_entry(name)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
        if let Some(kv) = builder.metadata().file_metadata().key_value_metadata() {
            if let Some(version) = kv
                .iter()
                .find(|kv| kv.key == KEY_FILE_VERSION)
                .and_then(|kv| kv.value.as_deref())
            {
                let version = version.parse::<u32>().map_err(|_| {
                    ReaderError::InvalidFormat(format!("{}: bad file version '{}'", name, version))
                })?;
                check_version(version)?;
            }
        }

        let reader = builder.build()?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        Ok(Some(batches))
    }
}
