pub mod matcher;
pub mod planner;

pub use matcher::{match_field, normalize_field_name};
pub use planner::{completion_percentage, plan, AutofillPlan, Coverage};
