mod support;

use chrono::{Duration, Utc};
use civicbase::models::{ApplicationRecord, ApplicationStatus};

use support::{form_data, sample_schema, StoreFixture};

fn draft_created_at(owner: &str, title: &str, offset_secs: i64) -> ApplicationRecord {
    let mut record =
        ApplicationRecord::new_draft(owner, title, form_data(&[]), sample_schema(), 0);
    record.created_at = Utc::now() + Duration::seconds(offset_secs);
    record
}

#[test]
fn migration_skips_collisions_and_keeps_novel_records() {
    let fixture = StoreFixture::new();
    let lifecycle = fixture.lifecycle();

    let existing = lifecycle
        .submit_direct(
            "owner-1",
            "Form A",
            form_data(&[("applicant_name", "Nguyen Van A")]),
            sample_schema(),
        )
        .unwrap();

    // One legacy record collides with the already-synced submission, one is
    // genuinely new.
    let mut colliding = draft_created_at("owner-1", "Form A", 0);
    colliding.id = existing.id;
    let novel = draft_created_at("owner-1", "Form B", 0);
    let novel_id = novel.id;

    lifecycle
        .migrate_legacy("owner-1", vec![colliding, novel])
        .expect("migration must not raise on a duplicate id");

    let records = lifecycle.list("owner-1");
    assert_eq!(records.len(), 2);
    assert!(records.iter().any(|r| r.id == novel_id));

    // The collision must not have overwritten the synced record.
    let kept = lifecycle.repository().get(existing.id).unwrap();
    assert_eq!(kept.status, ApplicationStatus::Applied);
    assert_eq!(
        kept.form_data.get("applicant_name").map(String::as_str),
        Some("Nguyen Van A")
    );
}

#[test]
fn reconcile_clears_the_cache_only_after_migration() {
    let fixture = StoreFixture::new();
    let lifecycle = fixture.lifecycle();
    let cache = fixture.legacy_cache();

    cache.push(draft_created_at("owner-1", "Form A", 0)).unwrap();
    cache.push(draft_created_at("owner-1", "Form B", 0)).unwrap();

    let migrated = lifecycle
        .reconcile_legacy(&cache, "owner-1")
        .expect("reconcile failed");
    assert_eq!(migrated, 2);
    assert!(cache.is_empty().unwrap());
    assert_eq!(lifecycle.list("owner-1").len(), 2);

    // Nothing left to drain on the second pass.
    assert_eq!(lifecycle.reconcile_legacy(&cache, "owner-1").unwrap(), 0);
}

#[test]
fn deduplicate_keeps_the_newest_record_per_group() {
    let fixture = StoreFixture::new();
    let lifecycle = fixture.lifecycle();
    let repo = lifecycle.repository();

    // Three drafts for the same form, created at t1 < t2 < t3, as left
    // behind by a client double-submission race.
    for offset in [10, 20, 30] {
        repo.create(draft_created_at("owner-1", "Form X", offset))
            .unwrap();
    }
    let newest_id = repo
        .list_by_owner("owner-1")
        .unwrap()
        .into_iter()
        .max_by_key(|r| r.created_at)
        .unwrap()
        .id;

    let removed = lifecycle.deduplicate("owner-1").unwrap();
    assert_eq!(removed, 2);

    let records = lifecycle.list("owner-1");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, newest_id);
}

#[test]
fn deduplicate_leaves_distinct_groups_alone() {
    let fixture = StoreFixture::new();
    let lifecycle = fixture.lifecycle();
    let repo = lifecycle.repository();

    repo.create(draft_created_at("owner-1", "Form X", 0)).unwrap();
    repo.create(draft_created_at("owner-1", "Form Y", 0)).unwrap();
    let submitted = lifecycle
        .submit_direct("owner-1", "Form X", form_data(&[]), sample_schema())
        .unwrap();

    // Same title, different status: not a duplicate group.
    assert_eq!(lifecycle.deduplicate("owner-1").unwrap(), 0);
    assert_eq!(lifecycle.list("owner-1").len(), 3);
    assert!(lifecycle.repository().get(submitted.id).is_ok());
}
