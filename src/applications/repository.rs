use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    ApplicationRecord, ApplicationStatus, FormFieldDescriptor, ProgressStage, ProgressTimeline,
};
use crate::storage::RecordStore;

/// Adapter over the external record store.
///
/// Owns the duplicate-prevention and draft-upsert semantics; everything else
/// passes through to the store. The store provides no server-side
/// serialization, so callers debounce autosave themselves (see
/// `AutosaveSettings`), and the draft-creation race left over from
/// concurrent first saves is repaired by `deduplicate`.
pub struct ApplicationRepository<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> ApplicationRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Upserts the draft for `(owner_id, form_title)`.
    ///
    /// Repeated autosave calls land on the most recent existing draft instead
    /// of creating new records. The attached schema is immutable; only the
    /// form data, completion share, and save timestamps are overwritten.
    pub fn create_draft_or_update(
        &self,
        owner_id: &str,
        form_title: &str,
        form_data: BTreeMap<String, String>,
        schema: Vec<FormFieldDescriptor>,
        completion_percentage: u8,
    ) -> Result<Uuid, StoreError> {
        let mut drafts: Vec<ApplicationRecord> = self
            .store
            .fetch_by_owner(owner_id)?
            .into_iter()
            .filter(|r| r.status == ApplicationStatus::Draft && r.form_title == form_title)
            .collect();
        drafts.sort_by_key(|r| r.created_at);

        if let Some(mut draft) = drafts.pop() {
            let now = Utc::now();
            draft.form_data = form_data;
            draft.completion_percentage = Some(completion_percentage);
            draft.last_saved = Some(now);
            draft.updated_at = now;
            let id = draft.id;
            self.store.update(draft)?;
            Ok(id)
        } else {
            let record = ApplicationRecord::new_draft(
                owner_id,
                form_title,
                form_data,
                schema,
                completion_percentage,
            );
            let id = record.id;
            self.store.insert(record)?;
            Ok(id)
        }
    }

    /// Inserts a fully-formed record. `DuplicateId` if the id exists; callers
    /// must not retry blindly with the same id.
    pub fn create(&self, record: ApplicationRecord) -> Result<(), StoreError> {
        self.store.insert(record)
    }

    pub fn get(&self, id: Uuid) -> Result<ApplicationRecord, StoreError> {
        self.store.fetch(id)?.ok_or(StoreError::NotFound(id))
    }

    /// Moves a draft to `applied`, stamping the applied stage. The lookup is
    /// draft-scoped, so a second call on the same id is `NotFound` rather
    /// than a double transition.
    pub fn promote_draft_to_applied(&self, id: Uuid) -> Result<ApplicationRecord, StoreError> {
        let mut record = self
            .store
            .fetch(id)?
            .filter(|r| r.status == ApplicationStatus::Draft)
            .ok_or(StoreError::NotFound(id))?;
        let now = Utc::now();
        record.status = ApplicationStatus::Applied;
        record.progress.mark(ProgressStage::Applied, now);
        record.updated_at = now;
        self.store.update(record.clone())?;
        Ok(record)
    }

    /// Persists a caller-supplied `(status, progress)` pair verbatim.
    ///
    /// Reachability of `new_status` from the current status is deliberately
    /// not validated; direct jumps (e.g. applied straight to confirmed) are
    /// existing product behavior the orchestration layer relies on.
    pub fn advance_status(
        &self,
        id: Uuid,
        new_status: ApplicationStatus,
        progress: ProgressTimeline,
    ) -> Result<ApplicationRecord, StoreError> {
        let mut record = self.get(id)?;
        record.status = new_status;
        record.progress = progress;
        record.updated_at = Utc::now();
        self.store.update(record.clone())?;
        Ok(record)
    }

    /// Returns the owner's records unsorted; ordering by latest activity is
    /// the caller's concern.
    pub fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ApplicationRecord>, StoreError> {
        self.store.fetch_by_owner(owner_id)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.remove(id)
    }

    /// Best-effort import of records that only ever lived in a client-local
    /// cache. Id collisions are skipped and logged, never surfaced; other
    /// store failures still abort so the caller keeps its legacy copy.
    pub fn migrate_legacy(
        &self,
        owner_id: &str,
        legacy_records: Vec<ApplicationRecord>,
    ) -> Result<(), StoreError> {
        for mut record in legacy_records {
            record.owner_id = owner_id.to_string();
            match self.store.insert(record) {
                Ok(()) => {}
                Err(StoreError::DuplicateId(id)) => {
                    warn!(%id, "legacy record already present in store, skipping");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Removes records duplicated by client double-submission races: per
    /// `(form_title, status)` group, only the most recently created record
    /// survives. Returns the number of records deleted.
    pub fn deduplicate(&self, owner_id: &str) -> Result<usize, StoreError> {
        let records = self.store.fetch_by_owner(owner_id)?;
        let mut groups: HashMap<(String, ApplicationStatus), Vec<ApplicationRecord>> =
            HashMap::new();
        for record in records {
            groups
                .entry((record.form_title.clone(), record.status))
                .or_default()
                .push(record);
        }

        let mut removed = 0;
        for (_, mut group) in groups {
            group.sort_by_key(|r| r.created_at);
            group.pop();
            for stale in group {
                self.store.remove(stale.id)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
