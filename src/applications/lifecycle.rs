use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

use crate::autofill::{completion_percentage, plan, AutofillPlan};
use crate::error::StoreError;
use crate::events::{EventType, LifecycleEvent, LifecycleLog};
use crate::models::{
    ApplicationRecord, ApplicationStatus, FormFieldDescriptor, ProgressStage,
};
use crate::storage::{ProfileStore, RecordStore};

use super::legacy::LegacyCache;
use super::repository::ApplicationRepository;

/// Orchestrates the application state machine over the repository.
///
/// States run draft -> applied -> reviewed -> confirmed, forward only, with
/// confirmed terminal. Transitions are last-write-wins; each user session is
/// presumed the sole mutator of its own records.
pub struct ApplicationLifecycle<S: RecordStore> {
    repo: ApplicationRepository<S>,
    log: LifecycleLog,
}

impl<S: RecordStore> ApplicationLifecycle<S> {
    pub fn new(store: S, log: LifecycleLog) -> Self {
        Self {
            repo: ApplicationRepository::new(store),
            log,
        }
    }

    pub fn repository(&self) -> &ApplicationRepository<S> {
        &self.repo
    }

    /// Persists an autosave tick. Re-entrant: every call for the same
    /// `(owner, form title)` pair lands on the same draft record.
    pub fn autosave_draft(
        &self,
        owner_id: &str,
        form_title: &str,
        form_data: BTreeMap<String, String>,
        schema: Vec<FormFieldDescriptor>,
    ) -> Result<Uuid> {
        let completion = completion_percentage(&form_data, &schema);
        let id =
            self.repo
                .create_draft_or_update(owner_id, form_title, form_data, schema, completion)?;
        self.log.append(&LifecycleEvent::new(
            owner_id,
            EventType::DraftSaved,
            json!({ "application_id": id, "completion_percentage": completion }),
        ))?;
        Ok(id)
    }

    /// Submits a draft. Fires exactly once per draft: the promotion lookup is
    /// draft-scoped, so a repeat call surfaces `NotFound`.
    pub fn submit(&self, id: Uuid) -> Result<ApplicationRecord> {
        let record = self.repo.promote_draft_to_applied(id)?;
        self.log.append(&LifecycleEvent::new(
            &record.owner_id,
            EventType::ApplicationSubmitted,
            json!({ "application_id": record.id, "form_title": record.form_title }),
        ))?;
        Ok(record)
    }

    /// One-shot submission with no draft phase (manually filled or scanned
    /// forms handed in as-is).
    pub fn submit_direct(
        &self,
        owner_id: &str,
        form_title: &str,
        form_data: BTreeMap<String, String>,
        schema: Vec<FormFieldDescriptor>,
    ) -> Result<ApplicationRecord> {
        let record = ApplicationRecord::new_submission(owner_id, form_title, form_data, schema);
        self.repo.create(record.clone())?;
        self.log.append(&LifecycleEvent::new(
            owner_id,
            EventType::ApplicationSubmitted,
            json!({ "application_id": record.id, "form_title": record.form_title }),
        ))?;
        Ok(record)
    }

    pub fn mark_reviewed(&self, id: Uuid) -> Result<ApplicationRecord> {
        self.advance(id, ApplicationStatus::Reviewed)
    }

    pub fn mark_confirmed(&self, id: Uuid) -> Result<ApplicationRecord> {
        self.advance(id, ApplicationStatus::Confirmed)
    }

    fn advance(&self, id: Uuid, new_status: ApplicationStatus) -> Result<ApplicationRecord> {
        let current = self.repo.get(id)?;
        let mut progress = current.progress.clone();
        let now = Utc::now();
        match new_status {
            ApplicationStatus::Applied => progress.mark(ProgressStage::Applied, now),
            ApplicationStatus::Reviewed => progress.mark(ProgressStage::Reviewed, now),
            ApplicationStatus::Confirmed => {
                // Jumping straight from applied also closes out review.
                progress.mark(ProgressStage::Reviewed, now);
                progress.mark(ProgressStage::Confirmed, now);
            }
            ApplicationStatus::Draft => {}
        }
        let record = self.repo.advance_status(id, new_status, progress)?;
        self.log.append(&LifecycleEvent::new(
            &record.owner_id,
            EventType::StatusAdvanced,
            json!({ "application_id": record.id, "status": record.status }),
        ))?;
        Ok(record)
    }

    /// The owner's applications ordered by most recent activity. A store
    /// failure degrades to an empty list so the UI can still render; writes
    /// never degrade this way.
    pub fn list(&self, owner_id: &str) -> Vec<ApplicationRecord> {
        let mut records = match self.repo.list_by_owner(owner_id) {
            Ok(records) => records,
            Err(err) => {
                warn!(owner_id, error = %err, "listing applications failed, showing none");
                return Vec::new();
            }
        };
        records.sort_by(|a, b| b.latest_activity().cmp(&a.latest_activity()));
        records
    }

    /// Irreversibly deletes an application. Only the owner may delete; an id
    /// belonging to someone else reads as `NotFound`.
    pub fn delete(&self, owner_id: &str, id: Uuid) -> Result<()> {
        let record = self.repo.get(id)?;
        if record.owner_id != owner_id {
            return Err(StoreError::NotFound(id).into());
        }
        self.repo.delete(id)?;
        self.log.append(&LifecycleEvent::new(
            owner_id,
            EventType::ApplicationDeleted,
            json!({ "application_id": id, "form_title": record.form_title }),
        ))?;
        Ok(())
    }

    pub fn migrate_legacy(
        &self,
        owner_id: &str,
        legacy_records: Vec<ApplicationRecord>,
    ) -> Result<()> {
        let count = legacy_records.len();
        self.repo.migrate_legacy(owner_id, legacy_records)?;
        self.log.append(&LifecycleEvent::new(
            owner_id,
            EventType::LegacyMigrated,
            json!({ "records": count }),
        ))?;
        Ok(())
    }

    /// Drains the legacy cache into the store. The cache is cleared only
    /// after the migration call has returned, so unmigrated records are never
    /// lost mid-flight.
    pub fn reconcile_legacy(&self, cache: &LegacyCache, owner_id: &str) -> Result<usize> {
        let records = cache.load()?;
        if records.is_empty() {
            return Ok(0);
        }
        let count = records.len();
        self.migrate_legacy(owner_id, records)?;
        cache.clear()?;
        Ok(count)
    }

    pub fn deduplicate(&self, owner_id: &str) -> Result<usize> {
        let removed = self.repo.deduplicate(owner_id)?;
        if removed > 0 {
            self.log.append(&LifecycleEvent::new(
                owner_id,
                EventType::DuplicatesRemoved,
                json!({ "removed": removed }),
            ))?;
        }
        Ok(removed)
    }

    /// Builds autofill suggestions for an extracted schema. Autofill is an
    /// optional convenience, so a profile read failure degrades to an empty
    /// plan instead of erroring.
    pub fn autofill(
        &self,
        profiles: &impl ProfileStore,
        owner_id: &str,
        fields: &[FormFieldDescriptor],
    ) -> AutofillPlan {
        let profile = match profiles.profile(owner_id) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(owner_id, error = %err, "profile lookup failed, skipping autofill");
                None
            }
        };
        plan(fields, profile.as_ref())
    }
}
