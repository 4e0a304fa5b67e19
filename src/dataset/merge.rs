//! Appending one test to another with monotonic indices.

use log::{debug, warn};

use super::{Dataset, DatasetError};
use crate::metadata::seconds_between;

/// Counts raw files appended while building one dataset.
#[derive(Debug, Clone)]
pub struct MergeGuard {
    limit: usize,
    appended: usize,
}

impl MergeGuard {
    /// Guard allowing at most `limit` appended files
    pub fn new(limit: usize) -> Self {
        Self { limit, appended: 0 }
    }

    /// Record one more appended file
    pub fn register(&mut self) -> Result<(), DatasetError> {
        self.appended += 1;
        if self.appended > self.limit {
            return Err(DatasetError::TooManyFilesToMerge { limit: self.limit });
        }
        Ok(())
    }

    /// Number of files appended so far
    pub fn appended(&self) -> usize {
        self.appended
    }
}

/// Append `second` to `first`.
///
/// Data points, cycle numbers and test times of `second` are shifted past
/// the end of `first`. Step and summary tables survive only when both
/// inputs carry one. Metadata of `first` is kept.
pub fn merge(first: Dataset, second: Dataset) -> Result<Dataset, DatasetError> {
    if first.is_empty() || second.is_empty() {
        return Err(DatasetError::EmptyDataset);
    }
    let mut merged = first;
    let mut other = second;

    let (mut raw, mut raw_other) = match (merged.raw.take(), other.raw.take()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(DatasetError::EmptyDataset),
    };

    let dp_offset = raw.max_data_point().unwrap_or(0);
    let cycle_offset = raw.max_cycle().unwrap_or(0);
    let time_offset =
        match seconds_between(merged.info.start_datetime, other.info.start_datetime) {
            Some(seconds) => seconds,
            None => {
                warn!(
                    "Start time unknown for '{}' or '{}', test time not offset",
                    merged.info.name, other.info.name
                );
                0.0
            }
        };
    debug!(
        "Merging '{}' into '{}': data point +{}, cycle +{}, test time +{}s",
        other.info.name, merged.info.name, dp_offset, cycle_offset, time_offset
    );

    raw_other.data_point.iter_mut().for_each(|v| *v += dp_offset);
    raw_other.cycle_index.iter_mut().for_each(|v| *v += cycle_offset);
    raw_other.test_time.iter_mut().for_each(|v| *v += time_offset);
    raw.append(raw_other);
    merged.raw = Some(raw);

    merged.steps = match (merged.steps.take(), other.steps.take()) {
        (Some(mut steps), Some(mut other_steps)) => {
            other_steps.offset_cycles(cycle_offset);
            steps.append(other_steps);
            Some(steps)
        }
        _ => None,
    };

    merged.summary = match (merged.summary.take(), other.summary.take()) {
        (Some(mut summary), Some(mut other_summary)) => {
            warn!("Merging summaries: cumulative columns of the appended test are not re-based");
            other_summary.offset(cycle_offset, time_offset);
            summary.append(other_summary);
            Some(summary)
        }
        _ => None,
    };

    merged.stat_data_points = match (merged.stat_data_points.take(), other.stat_data_points) {
        (Some(mut points), Some(other_points)) => {
            points.extend(other_points.into_iter().map(|p| p + dp_offset));
            Some(points)
        }
        _ => None,
    };

    merged.raw_data_files.extend(other.raw_data_files);
    merged
        .raw_data_files_length
        .extend(other.raw_data_files_length);
    merged.merged = true;

    Ok(merged)
}
