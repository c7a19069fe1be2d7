pub mod application;
pub mod form;
pub mod profile;

pub use application::{
    ApplicationRecord, ApplicationStatus, ProgressStage, ProgressTimeline, StageProgress,
};
pub use form::{FieldType, FormFieldDescriptor};
pub use profile::{ProfileAttribute, UserProfile};
