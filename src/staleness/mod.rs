//! # cellpeak Staleness Module
//!
//! Decides whether a saved artifact still reflects its raw files, so the
//! expensive raw load can be skipped.
//!
//! The artifact records a [`FileId`](crate::metadata::FileId) for every raw
//! file it was built from. It is up to date when the current raw files,
//! keyed by base name, carry the same value of the chosen
//! [`FileIdKey`](crate::metadata::FileIdKey) as recorded. Anything else
//! (a missing artifact, a missing file id table, a changed, added or
//! vanished raw file) makes it stale.

mod check;
mod report;

#[cfg(test)]
mod tests;

pub use check::{check_artifact, check_file_ids, compare_ids, file_id_map, raw_file_ids, IdMap};
pub use report::{CheckStatus, FileCheck, StalenessReport};
