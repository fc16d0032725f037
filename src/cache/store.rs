use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::record::PullRequestRecord;

/// Default store location, relative to the working directory
pub const DEFAULT_CACHE_PATH: &str = "hermes.cache";

/// Key under which a pull request's record is stored
pub fn cache_key(number: u64) -> String {
    format!("pr_{}", number)
}

/// Disk-persistent store of pull request records keyed by number
///
/// Backed by cacache. Each insert is written through to disk before it
/// returns, so records survive a run that fails part way. The only
/// supported invalidation is deleting the store directory.
pub struct RecordCache {
    path: PathBuf,
    written: usize,
}

impl RecordCache {
    /// Open the store at `path`, creating it if needed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create cache directory at {}", path.display()))?;

        Ok(Self { path, written: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up the record for a pull request
    ///
    /// Returns `Ok(None)` if the number has never been stored. An entry that
    /// exists but cannot be decoded is an error: the store was written by an
    /// incompatible version and has to be deleted.
    pub fn get(&self, number: u64) -> Result<Option<PullRequestRecord>> {
        let key = cache_key(number);

        let metadata = cacache::metadata_sync(&self.path, &key)
            .with_context(|| format!("Failed to read cache index for {}", key))?;
        if metadata.is_none() {
            return Ok(None);
        }

        let bytes = cacache::read_sync(&self.path, &key)
            .with_context(|| format!("Failed to read cache entry {}", key))?;

        let record = serde_json::from_slice(&bytes).with_context(|| {
            format!(
                "Failed to decode cache entry {}. Delete {} to rebuild the cache",
                key,
                self.path.display()
            )
        })?;

        Ok(Some(record))
    }

    /// Store a record under its pull request number
    pub fn insert(&mut self, record: &PullRequestRecord) -> Result<()> {
        let key = cache_key(record.number);
        let json = serde_json::to_vec(record).context("Failed to serialize record")?;

        cacache::write_sync(&self.path, &key, &json)
            .with_context(|| format!("Failed to write cache entry {}", key))?;

        self.written += 1;
        Ok(())
    }

    /// Number of records inserted through this handle
    pub fn written(&self) -> usize {
        self.written
    }

    /// Number of records currently in the store
    pub fn len(&self) -> usize {
        cacache::list_sync(&self.path)
            .filter_map(|entry| entry.ok())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// End of the store's lifecycle for this run
    pub fn close(self) -> Result<()> {
        log::debug!(
            "Closing cache at {} ({} new records)",
            self.path.display(),
            self.written
        );
        Ok(())
    }
}
