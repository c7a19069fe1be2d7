use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::form::FormFieldDescriptor;

/// Workflow status of an application. Strictly forward-moving; no regression
/// transitions are defined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    Applied,
    Reviewed,
    Confirmed,
}

/// Post-submission stages tracked in the progress timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStage {
    Applied,
    Reviewed,
    Confirmed,
}

/// Completion marker for a single stage. `date` is set exactly once, on the
/// first transition into the stage, and never cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageProgress {
    pub date: Option<DateTime<Utc>>,
    pub completed: bool,
}

/// Per-stage progress record for applied/reviewed/confirmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressTimeline {
    #[serde(default)]
    pub applied: StageProgress,
    #[serde(default)]
    pub reviewed: StageProgress,
    #[serde(default)]
    pub confirmed: StageProgress,
}

impl ProgressTimeline {
    /// Marks a stage complete, stamping its date on first entry only.
    pub fn mark(&mut self, stage: ProgressStage, at: DateTime<Utc>) {
        let entry = match stage {
            ProgressStage::Applied => &mut self.applied,
            ProgressStage::Reviewed => &mut self.reviewed,
            ProgressStage::Confirmed => &mut self.confirmed,
        };
        if !entry.completed {
            entry.completed = true;
            entry.date = Some(at);
        }
    }

    pub fn latest_date(&self) -> Option<DateTime<Utc>> {
        [&self.applied, &self.reviewed, &self.confirmed]
            .into_iter()
            .filter_map(|stage| stage.date)
            .max()
    }
}

/// A single government-form application tracked for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub form_title: String,
    #[serde(default)]
    pub form_data: BTreeMap<String, String>,
    #[serde(default)]
    pub schema: Vec<FormFieldDescriptor>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub progress: ProgressTimeline,
    /// Draft-only completion share, recomputed by the caller on each edit.
    #[serde(default)]
    pub completion_percentage: Option<u8>,
    /// Timestamp of the last draft autosave; absent on non-draft records.
    #[serde(default)]
    pub last_saved: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Builds a fresh draft with zeroed progress.
    pub fn new_draft(
        owner_id: impl Into<String>,
        form_title: impl Into<String>,
        form_data: BTreeMap<String, String>,
        schema: Vec<FormFieldDescriptor>,
        completion_percentage: u8,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            form_title: form_title.into(),
            form_data,
            schema,
            status: ApplicationStatus::Draft,
            progress: ProgressTimeline::default(),
            completion_percentage: Some(completion_percentage),
            last_saved: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds a one-shot submission that skips the draft phase entirely
    /// (manually filled or scanned forms handed in as-is).
    pub fn new_submission(
        owner_id: impl Into<String>,
        form_title: impl Into<String>,
        form_data: BTreeMap<String, String>,
        schema: Vec<FormFieldDescriptor>,
    ) -> Self {
        let now = Utc::now();
        let mut progress = ProgressTimeline::default();
        progress.mark(ProgressStage::Applied, now);
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            form_title: form_title.into(),
            form_data,
            schema,
            status: ApplicationStatus::Applied,
            progress,
            completion_percentage: None,
            last_saved: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Most recent activity across stage dates, autosave, and creation.
    /// Callers sort application lists by this, descending.
    pub fn latest_activity(&self) -> DateTime<Utc> {
        self.progress
            .latest_date()
            .into_iter()
            .chain(self.last_saved)
            .chain(std::iter::once(self.created_at))
            .max()
            .unwrap_or(self.created_at)
    }
}
