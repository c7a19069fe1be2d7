pub mod applications;
pub mod autofill;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod storage;

// Re-export commonly used types for convenience.
pub use applications::{ApplicationLifecycle, ApplicationRepository, LegacyCache};
pub use autofill::{AutofillPlan, Coverage};
pub use error::StoreError;
pub use models::{ApplicationRecord, ApplicationStatus, FormFieldDescriptor, UserProfile};
pub use storage::{ProfileStore, RecordStore, StoreManager};
