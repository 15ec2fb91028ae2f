//! Persistence collaborators for the point list.
//!
//! The engine never touches the filesystem itself; callers hand a
//! [`PointRepository`] to [`crate::Session::open`] and [`crate::Session::save`].

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::Result;
use crate::store::PointRecord;

/// Durable storage for the ordered point list.
pub trait PointRepository {
    /// Load every stored record in order.
    fn load(&self) -> Result<Vec<PointRecord>>;

    /// Replace the stored list with `records`.
    fn save(&self, records: &[PointRecord]) -> Result<()>;

    /// Append one record and return the new record count.
    fn append(&self, record: PointRecord) -> Result<usize> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)?;
        Ok(records.len())
    }
}

/// JSON array on disk, pretty-printed with two-space indentation.
///
/// A missing or blank file reads as an empty list. Writes go to a temporary
/// file in the same directory which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PointRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<PointRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "point file missing; starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<PointRecord> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = records.len(), "read point file");
        Ok(records)
    }

    fn save(&self, records: &[PointRecord]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut tmp = NamedTempFile::new_in(&parent)?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        info!(path = %self.path.display(), count = records.len(), "saved point file");
        Ok(())
    }
}

/// In-memory repository for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<PointRecord>>,
}

impl MemoryRepository {
    pub fn new(records: Vec<PointRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Copy of the currently stored records.
    pub fn records(&self) -> Vec<PointRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PointRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PointRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<PointRecord>> {
        Ok(self.lock().clone())
    }

    fn save(&self, records: &[PointRecord]) -> Result<()> {
        *self.lock() = records.to_vec();
        Ok(())
    }
}
