use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::models::ApplicationRecord;

/// Client-local write-ahead buffer for applications recorded before the
/// authoritative store was reachable.
///
/// Once `reconcile_legacy` has pushed its contents into the store it is
/// cleared and never consulted again; it is a buffer, not a second source of
/// truth.
pub struct LegacyCache {
    path: PathBuf,
}

impl LegacyCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Vec<ApplicationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let records = serde_json::from_slice(&fs::read(&self.path)?)?;
        Ok(records)
    }

    pub fn push(&self, record: ApplicationRecord) -> Result<()> {
        let mut records = self.load()?;
        records.push(record);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&records)?)?;
        Ok(())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.load()?.is_empty())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
