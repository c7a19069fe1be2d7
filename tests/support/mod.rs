#![allow(dead_code)]

use civicbase::applications::{ApplicationLifecycle, LegacyCache};
use civicbase::models::{FieldType, FormFieldDescriptor, UserProfile};
use civicbase::storage::StoreManager;
use std::collections::BTreeMap;
use tempfile::TempDir;

/// Shared workspace fixture backing the integration tests.
pub struct StoreFixture {
    workspace: TempDir,
}

impl StoreFixture {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self { workspace }
    }

    pub fn store(&self) -> StoreManager {
        StoreManager::at(self.workspace.path().to_path_buf())
            .expect("failed to open store in temp workspace")
    }

    pub fn lifecycle(&self) -> ApplicationLifecycle<StoreManager> {
        let store = self.store();
        let log = store.lifecycle_log();
        ApplicationLifecycle::new(store, log)
    }

    pub fn legacy_cache(&self) -> LegacyCache {
        LegacyCache::new(self.workspace.path().join("legacy_applications.json"))
    }

    pub fn seed_profile(&self, profile: &UserProfile) {
        self.store()
            .save_profile(profile)
            .expect("failed to seed profile");
    }
}

pub fn sample_profile(owner_id: &str) -> UserProfile {
    UserProfile {
        full_name: Some("Nguyen Van A".into()),
        email: Some("nguyen.van.a@example.com".into()),
        phone_number: Some("+84 912 345 678".into()),
        id_number: Some("079123456789".into()),
        address: Some("12 Le Loi, District 1, Ho Chi Minh City".into()),
        ..UserProfile::new(owner_id)
    }
}

pub fn sample_schema() -> Vec<FormFieldDescriptor> {
    vec![
        FormFieldDescriptor {
            required: true,
            ..FormFieldDescriptor::new("applicant_name", "Tên người nộp đơn")
        },
        FormFieldDescriptor {
            field_type: FieldType::Tel,
            ..FormFieldDescriptor::new("phone_number", "Số điện thoại")
        },
        FormFieldDescriptor {
            field_type: FieldType::Date,
            ..FormFieldDescriptor::new("signature_date", "Ngày ký")
        },
    ]
}

pub fn form_data(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
