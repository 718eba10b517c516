//! Periodic partial exports during long runs.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::json;
use crate::error::ExportError;
use crate::models::PractitionerRecord;

/// Writes `<dir>/<prefix>_partial_<count>.json` whenever `every` more
/// records have accumulated since the last checkpoint. `every == 0`
/// disables checkpointing.
#[derive(Debug, Clone)]
pub struct Checkpointer {
    dir: PathBuf,
    prefix: String,
    every: usize,
    last: usize,
}

impl Checkpointer {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, every: usize) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            every,
            last: 0,
        }
    }

    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), String::new(), 0)
    }

    pub fn path_for(&self, count: usize) -> PathBuf {
        self.dir.join(format!("{}_partial_{}.json", self.prefix, count))
    }

    /// Checkpoint `records` if enough have accumulated. Failures are
    /// logged; the run continues.
    pub fn maybe_write(&mut self, records: &[PractitionerRecord]) -> Option<PathBuf> {
        if self.every == 0 || records.len() < self.last + self.every {
            return None;
        }
        let path = self.path_for(records.len());
        if let Err(e) = write_checkpoint(&self.dir, &path, records) {
            warn!("Checkpoint failed: {}", e);
            return None;
        }
        self.last = records.len();
        info!("Saved partial data at {} records", records.len());
        Some(path)
    }
}

fn write_checkpoint(
    dir: &Path,
    path: &Path,
    records: &[PractitionerRecord],
) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    json::write(records, path)
}
