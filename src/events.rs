use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Lifecycle events appended to the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DraftSaved,
    ApplicationSubmitted,
    StatusAdvanced,
    ApplicationDeleted,
    LegacyMigrated,
    DuplicatesRemoved,
}

/// General-purpose lifecycle event stored as JSONL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub event_id: Uuid,
    pub owner_id: String,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

impl LifecycleEvent {
    pub fn new(owner_id: impl Into<String>, event_type: EventType, details: serde_json::Value) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            event_type,
            timestamp: Utc::now(),
            details,
        }
    }
}

/// Append-only JSONL log of lifecycle events.
pub struct LifecycleLog {
    events_path: PathBuf,
}

impl LifecycleLog {
    pub fn new(events_path: PathBuf) -> Self {
        Self { events_path }
    }

    pub fn append(&self, event: &LifecycleEvent) -> Result<()> {
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)?;
        file.write_all(serde_json::to_string(event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<LifecycleEvent>> {
        if !self.events_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.events_path)?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            events.push(serde_json::from_str(line)?);
        }
        Ok(events)
    }
}
