//! Field-label matching against the profile schema.
//!
//! Field names originate from OCR/LLM extraction over heterogeneous
//! real-world government forms, often in other languages, so an exact alias
//! dictionary alone under-covers. A keyword fallback trades precision for
//! recall while keeping every decision traceable to a single table row.

use crate::models::{FormFieldDescriptor, ProfileAttribute, UserProfile};

/// Exact lookup table from normalized field name to profile attribute.
/// No alias may map to two attributes; `alias_table_is_unambiguous` below
/// enforces that whenever entries are added.
const ALIASES: &[(&str, ProfileAttribute)] = &[
    ("full_name", ProfileAttribute::FullName),
    ("fullname", ProfileAttribute::FullName),
    ("name", ProfileAttribute::FullName),
    ("applicant_name", ProfileAttribute::FullName),
    ("owner_name", ProfileAttribute::FullName),
    ("contact_name", ProfileAttribute::FullName),
    ("email", ProfileAttribute::Email),
    ("email_address", ProfileAttribute::Email),
    ("e_mail", ProfileAttribute::Email),
    ("applicant_email", ProfileAttribute::Email),
    ("contact_email", ProfileAttribute::Email),
    ("phone", ProfileAttribute::PhoneNumber),
    ("phone_number", ProfileAttribute::PhoneNumber),
    ("mobile", ProfileAttribute::PhoneNumber),
    ("mobile_number", ProfileAttribute::PhoneNumber),
    ("telephone", ProfileAttribute::PhoneNumber),
    ("tel", ProfileAttribute::PhoneNumber),
    ("contact_number", ProfileAttribute::PhoneNumber),
    ("id_number", ProfileAttribute::IdNumber),
    ("national_id", ProfileAttribute::IdNumber),
    ("citizen_id", ProfileAttribute::IdNumber),
    ("id_card", ProfileAttribute::IdNumber),
    ("id_card_number", ProfileAttribute::IdNumber),
    ("passport_number", ProfileAttribute::IdNumber),
    ("identification_number", ProfileAttribute::IdNumber),
    ("address", ProfileAttribute::Address),
    ("home_address", ProfileAttribute::Address),
    ("residential_address", ProfileAttribute::Address),
    ("permanent_address", ProfileAttribute::Address),
    ("current_address", ProfileAttribute::Address),
    ("date_of_birth", ProfileAttribute::DateOfBirth),
    ("dob", ProfileAttribute::DateOfBirth),
    ("birth_date", ProfileAttribute::DateOfBirth),
    ("birthdate", ProfileAttribute::DateOfBirth),
    ("gender", ProfileAttribute::Gender),
    ("sex", ProfileAttribute::Gender),
    ("nationality", ProfileAttribute::Nationality),
    ("citizenship", ProfileAttribute::Nationality),
    ("occupation", ProfileAttribute::Occupation),
    ("job", ProfileAttribute::Occupation),
    ("job_title", ProfileAttribute::Occupation),
    ("profession", ProfileAttribute::Occupation),
];

/// Keyword fallback, scanned in priority order. The first category whose
/// keyword set intersects the field's tokens wins, even if the matched
/// profile attribute turns out to be empty.
const KEYWORD_CATEGORIES: &[(ProfileAttribute, &[&str])] = &[
    (
        ProfileAttribute::FullName,
        &["name", "applicant", "owner", "contact"],
    ),
    (ProfileAttribute::Email, &["email", "mail", "contact"]),
    (
        ProfileAttribute::PhoneNumber,
        &["phone", "mobile", "tel", "contact"],
    ),
    (
        ProfileAttribute::Address,
        &["address", "location", "residence", "home"],
    ),
    (
        ProfileAttribute::IdNumber,
        &["id", "number", "card", "passport", "citizen"],
    ),
];

/// Lowercases a field name and collapses whitespace/hyphen/underscore runs
/// to single underscores.
pub fn normalize_field_name(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Maps a form field to a profile value; empty string means "cannot
/// autofill". Never errors: missing mappings and unset attributes both
/// degrade to empty.
pub fn match_field(field: &FormFieldDescriptor, profile: &UserProfile) -> String {
    let normalized = normalize_field_name(&field.name);

    if let Some((_, attribute)) = ALIASES.iter().find(|(alias, _)| *alias == normalized) {
        return profile.attribute(*attribute).unwrap_or_default().to_string();
    }

    let tokens: Vec<&str> = normalized.split('_').collect();
    for (attribute, keywords) in KEYWORD_CATEGORIES {
        if keywords.iter().any(|keyword| tokens.contains(keyword)) {
            return profile.attribute(*attribute).unwrap_or_default().to_string();
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn alias_table_is_unambiguous() {
        let mut seen: HashMap<&str, ProfileAttribute> = HashMap::new();
        for (alias, attribute) in ALIASES {
            if let Some(previous) = seen.insert(alias, *attribute) {
                panic!("alias {alias:?} maps to both {previous:?} and {attribute:?}");
            }
        }
    }

    #[test]
    fn alias_table_entries_are_normalized() {
        for (alias, _) in ALIASES {
            assert_eq!(
                *alias,
                normalize_field_name(alias),
                "alias {alias:?} is not in normalized form"
            );
        }
    }

    #[test]
    fn normalization_collapses_separators() {
        assert_eq!(normalize_field_name("Full  Name"), "full_name");
        assert_eq!(normalize_field_name("applicant--name"), "applicant_name");
        assert_eq!(normalize_field_name("  Phone-Number_ "), "phone_number");
    }

    #[test]
    fn keyword_priority_prefers_name_over_contact_categories() {
        let profile = UserProfile {
            full_name: Some("Nguyen Van A".into()),
            email: Some("a@example.com".into()),
            ..UserProfile::new("owner-1")
        };
        // "contact" appears in the name, email, and phone keyword sets;
        // the name-like category is scanned first.
        let field = FormFieldDescriptor::new("emergency_contact", "Emergency contact");
        assert_eq!(match_field(&field, &profile), "Nguyen Van A");
    }
}
