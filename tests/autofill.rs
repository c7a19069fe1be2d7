mod support;

use civicbase::autofill::{match_field, plan};
use civicbase::models::{FormFieldDescriptor, UserProfile};

use support::{sample_profile, sample_schema, StoreFixture};

#[test]
fn alias_match_returns_profile_value_for_foreign_label() {
    let profile = sample_profile("owner-1");
    let field = FormFieldDescriptor::new("applicant_name", "Tên người nộp đơn");
    assert_eq!(match_field(&field, &profile), "Nguyen Van A");
}

#[test]
fn keyword_fallback_covers_unseen_surface_forms() {
    let profile = sample_profile("owner-1");
    // Not in the alias table; "address" token carries the match.
    let field = FormFieldDescriptor::new("Mailing Address Line 1", "Địa chỉ");
    assert_eq!(
        match_field(&field, &profile),
        "12 Le Loi, District 1, Ho Chi Minh City"
    );
}

#[test]
fn date_only_names_do_not_match() {
    let profile = sample_profile("owner-1");
    // "date" alone carries no keyword; only an explicit alias could match.
    let field = FormFieldDescriptor::new("signature_date", "Ngày ký");
    assert_eq!(match_field(&field, &profile), "");
}

#[test]
fn unset_attribute_yields_empty_string() {
    let profile = UserProfile::new("owner-2");
    let field = FormFieldDescriptor::new("full_name", "Full name");
    assert_eq!(match_field(&field, &profile), "");
}

#[test]
fn empty_attribute_is_treated_as_unset() {
    let profile = UserProfile {
        email: Some("   ".into()),
        ..UserProfile::new("owner-2")
    };
    let field = FormFieldDescriptor::new("email_address", "Email");
    assert_eq!(match_field(&field, &profile), "");
}

#[test]
fn plan_without_profile_suggests_nothing() {
    let fields = sample_schema();
    let result = plan(&fields, None);
    assert!(result.suggestions.is_empty());
    assert_eq!(result.coverage.matched, 0);
    assert_eq!(result.coverage.percent_matched, 0);
    assert_eq!(result.coverage.total, fields.len());
}

#[test]
fn plan_on_empty_schema_has_zero_coverage() {
    let profile = sample_profile("owner-1");
    let result = plan(&[], Some(&profile));
    assert_eq!(result.coverage.total, 0);
    assert_eq!(result.coverage.percent_matched, 0);
}

#[test]
fn plan_reports_rounded_coverage() {
    let profile = sample_profile("owner-1");
    let fields = sample_schema();
    let result = plan(&fields, Some(&profile));
    // applicant_name and phone_number match, signature_date does not.
    assert_eq!(result.coverage.total, 3);
    assert_eq!(result.coverage.matched, 2);
    assert_eq!(result.coverage.percent_matched, 67);
    assert_eq!(
        result.suggestions.get("applicant_name").map(String::as_str),
        Some("Nguyen Van A")
    );
    assert!(!result.suggestions.contains_key("signature_date"));
}

#[test]
fn lifecycle_autofill_degrades_without_profile() {
    let fixture = StoreFixture::new();
    let lifecycle = fixture.lifecycle();
    let store = fixture.store();

    let empty = lifecycle.autofill(&store, "owner-unknown", &sample_schema());
    assert!(empty.suggestions.is_empty());

    fixture.seed_profile(&sample_profile("owner-1"));
    let filled = lifecycle.autofill(&store, "owner-1", &sample_schema());
    assert_eq!(filled.coverage.matched, 2);
}
