use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::MetadataError;

/// Provenance record of one raw data file.
///
/// Captured from a file system stat when the file is loaded and never
/// updated afterwards, so it describes the file as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileId {
    /// File name without directory
    pub name: String,

    /// Full path as given when loading
    pub full_name: String,

    /// Parent directory
    pub location: String,

    /// File size in bytes
    pub size: u64,

    /// Last modification time (seconds since the Unix epoch)
    pub last_modified: f64,

    /// Last access time (seconds since the Unix epoch)
    pub last_accessed: f64,

    /// Last metadata change time (seconds since the Unix epoch)
    pub last_info_changed: f64,
}

/// Which [`FileId`] attribute decides whether a raw file changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileIdKey {
    /// File size in bytes
    #[default]
    Size,
    /// Last modification time
    Modified,
    /// Last access time
    Accessed,
}

impl FromStr for FileIdKey {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "size" => Ok(Self::Size),
            "modified" => Ok(Self::Modified),
            "accessed" => Ok(Self::Accessed),
            other => Err(MetadataError::InvalidFileIdKey(other.to_string())),
        }
    }
}

impl fmt::Display for FileIdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Size => "size",
            Self::Modified => "modified",
            Self::Accessed => "accessed",
        };
        f.write_str(name)
    }
}

fn seconds_since_epoch(time: std::io::Result<SystemTime>) -> f64 {
    time.ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

impl FileId {
    /// Stat a file and record its provenance.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let location = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let last_modified = seconds_since_epoch(meta.modified());
        let last_info_changed = match meta.created() {
            Ok(created) => seconds_since_epoch(Ok(created)),
            Err(_) => last_modified,
        };

        Ok(Self {
            name,
            full_name: path.to_string_lossy().into_owned(),
            location,
            size: meta.len(),
            last_modified,
            last_accessed: seconds_since_epoch(meta.accessed()),
            last_info_changed,
        })
    }

    /// Value compared by the staleness check, truncated to whole units.
    pub fn key_value(&self, key: FileIdKey) -> i64 {
        match key {
            FileIdKey::Size => self.size as i64,
            FileIdKey::Modified => self.last_modified as i64,
            FileIdKey::Accessed => self.last_accessed as i64,
        }
    }
}
