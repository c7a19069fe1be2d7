use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::{self, AppConfig, WorkspacePaths};
use crate::error::StoreError;
use crate::events::LifecycleLog;
use crate::models::{ApplicationRecord, UserProfile};

use super::{ProfileStore, RecordStore};

/// JSON-file backed store used for local development and tests.
///
/// All application records live in one pretty-printed document; profiles are
/// one file per owner. Mirrors the access patterns of the hosted store, so
/// the repository behaves identically against either.
pub struct StoreManager {
    pub config: AppConfig,
    pub paths: WorkspacePaths,
}

impl StoreManager {
    /// Opens the store at the configured workspace root.
    pub fn new() -> Result<Self> {
        let paths = config::ensure_workspace_structure()?;
        let config = config::load_or_default()?;
        Ok(Self { config, paths })
    }

    /// Opens the store at an explicit root, bypassing env/OS resolution.
    pub fn at(root: PathBuf) -> Result<Self> {
        let paths = WorkspacePaths::under(root);
        fs::create_dir_all(&paths.root)?;
        fs::create_dir_all(&paths.profiles_dir)?;
        Ok(Self {
            config: AppConfig::default(),
            paths,
        })
    }

    pub fn lifecycle_log(&self) -> LifecycleLog {
        LifecycleLog::new(self.paths.events_path.clone())
    }

    fn load_all(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        if !self.paths.applications_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read(&self.paths.applications_path).map_err(StoreError::unavailable)?;
        serde_json::from_slice(&data).map_err(StoreError::unavailable)
    }

    fn save_all(&self, records: &[ApplicationRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.paths.applications_path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::unavailable)?;
        }
        let data = serde_json::to_vec_pretty(records).map_err(StoreError::unavailable)?;
        fs::write(&self.paths.applications_path, data).map_err(StoreError::unavailable)
    }

    fn profile_path(&self, owner_id: &str) -> PathBuf {
        self.paths.profiles_dir.join(format!("{owner_id}.json"))
    }

    /// Seeds or replaces a profile document. Exposed for the identity layer
    /// and test fixtures; the core itself never calls this.
    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        fs::create_dir_all(&self.paths.profiles_dir)?;
        let path = self.profile_path(&profile.owner_id);
        fs::write(path, serde_json::to_vec_pretty(profile)?)?;
        Ok(())
    }
}

impl RecordStore for StoreManager {
    fn fetch(&self, id: Uuid) -> Result<Option<ApplicationRecord>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|r| r.id == id))
    }

    fn fetch_by_owner(&self, owner_id: &str) -> Result<Vec<ApplicationRecord>, StoreError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.owner_id == owner_id)
            .collect())
    }

    fn insert(&self, record: ApplicationRecord) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        records.push(record);
        self.save_all(&records)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record;
                self.save_all(&records)
            }
            None => Err(StoreError::NotFound(record.id)),
        }
    }

    fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        self.save_all(&records)
    }
}

impl ProfileStore for StoreManager {
    fn profile(&self, owner_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let path = self.profile_path(owner_id);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(&path).map_err(StoreError::unavailable)?;
        let profile = serde_json::from_slice(&data).map_err(StoreError::unavailable)?;
        Ok(Some(profile))
    }
}
