use std::fmt;

/// Statistics from a completed save
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    /// Rows of the raw table
    pub raw_rows: usize,
    /// Rows of the step table, 0 when not made
    pub step_rows: usize,
    /// Rows of the summary, 0 when not made
    pub summary_rows: usize,
    /// Number of raw files recorded
    pub file_ids: usize,
    /// Size of the artifact in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} raw rows, {} steps and {} summary rows from {} raw files ({} bytes)",
            self.raw_rows, self.step_rows, self.summary_rows, self.file_ids, self.file_size_bytes
        )
    }
}
