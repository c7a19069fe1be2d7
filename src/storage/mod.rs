mod json_store;

pub use json_store::StoreManager;

use crate::error::StoreError;
use crate::models::{ApplicationRecord, UserProfile};
use uuid::Uuid;

/// Generic query interface over the external record store.
///
/// The hosted backend is out of scope; the core talks to whatever implements
/// this. Records are keyed by `id`, with a secondary access pattern by owner
/// that callers filter down to `(owner, form_title, status)` themselves.
pub trait RecordStore {
    fn fetch(&self, id: Uuid) -> Result<Option<ApplicationRecord>, StoreError>;
    fn fetch_by_owner(&self, owner_id: &str) -> Result<Vec<ApplicationRecord>, StoreError>;
    /// Inserts a new record; `DuplicateId` if the id already exists.
    fn insert(&self, record: ApplicationRecord) -> Result<(), StoreError>;
    /// Replaces an existing record; `NotFound` if the id does not exist.
    fn update(&self, record: ApplicationRecord) -> Result<(), StoreError>;
    fn remove(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Read-only view of the external profile store. The core never mutates
/// profiles as a side effect of autofill or lifecycle operations.
pub trait ProfileStore {
    fn profile(&self, owner_id: &str) -> Result<Option<UserProfile>, StoreError>;
}
