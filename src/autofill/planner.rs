use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{FormFieldDescriptor, UserProfile};

use super::matcher::match_field;

/// How much of a schema the matcher could cover.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coverage {
    pub total: usize,
    pub matched: usize,
    pub percent_matched: u8,
}

/// Proposed values per field name plus coverage statistics. Suggestions are
/// never applied without explicit user action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutofillPlan {
    pub suggestions: BTreeMap<String, String>,
    pub coverage: Coverage,
}

/// Runs the matcher across a full schema. Side-effect-free and idempotent;
/// an absent profile yields an empty plan rather than an error.
pub fn plan(fields: &[FormFieldDescriptor], profile: Option<&UserProfile>) -> AutofillPlan {
    let total = fields.len();
    let Some(profile) = profile else {
        return AutofillPlan {
            suggestions: BTreeMap::new(),
            coverage: Coverage {
                total,
                ..Coverage::default()
            },
        };
    };

    let mut suggestions = BTreeMap::new();
    for field in fields {
        let value = match_field(field, profile);
        if !value.is_empty() {
            suggestions.insert(field.name.clone(), value);
        }
    }

    let matched = suggestions.len();
    AutofillPlan {
        suggestions,
        coverage: Coverage {
            total,
            matched,
            percent_matched: percent(matched, total),
        },
    }
}

/// Share of schema fields holding a non-empty value, rounded to a whole
/// percent. Drafts recompute this on every edit.
pub fn completion_percentage(
    form_data: &BTreeMap<String, String>,
    schema: &[FormFieldDescriptor],
) -> u8 {
    let filled = schema
        .iter()
        .filter(|field| {
            form_data
                .get(&field.name)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false)
        })
        .count();
    percent(filled, schema.len())
}

fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u8
}
