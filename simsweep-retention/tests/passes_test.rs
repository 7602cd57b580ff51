use chrono::NaiveDate;

use simsweep_core::models::{
    ExternalRetentionCategory, Folder, PathProtection, RetentionType, RootFolder, ScanResult,
};
use simsweep_core::traits::ICleanupStore;
use simsweep_retention::{apply_scan_results, run_mark_pass, run_unmark_pass};
use simsweep_storage::MemoryStore;

// ── Fixtures ──────────────────────────────────────────────────────────────

const UNDEFINED: i64 = 1;
const MARKED: i64 = 3;
const NEXT: i64 = 4;
const Q1: i64 = 5;
const CLEAN: i64 = 6;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn round_start() -> NaiveDate {
    date(2025, 1, 1)
}

fn retention_type(id: i64, name: &str, days: Option<i64>, endstage: bool) -> RetentionType {
    RetentionType {
        id,
        name: name.to_string(),
        days_to_cleanup: days,
        is_endstage: endstage,
        display_rank: id as i32,
    }
}

fn seed_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .add_rootfolder(RootFolder {
            id: 1,
            path: "/data/r1".to_string(),
            storage_id: Some("st1".to_string()),
        })
        .unwrap();
    store
        .add_catalog(
            1,
            vec![
                retention_type(UNDEFINED, "?", None, false),
                retention_type(2, "path", None, false),
                retention_type(MARKED, "marked", Some(0), false),
                retention_type(NEXT, "next", Some(7), false),
                retention_type(Q1, "q1", Some(90), false),
                retention_type(CLEAN, "clean", None, true),
                retention_type(7, "issue", None, true),
                retention_type(8, "missing", None, true),
            ],
        )
        .unwrap();
    store
}

fn add_folder(
    store: &MemoryStore,
    path: &str,
    retention_id: Option<i64>,
    expiration: Option<NaiveDate>,
    modified: Option<NaiveDate>,
) -> Folder {
    store
        .add_folder(Folder {
            id: 0,
            rootfolder_id: 1,
            path: path.to_string(),
            retention_id,
            expiration_date: expiration,
            modified_date: modified,
            path_protection_id: None,
        })
        .unwrap()
}

fn scan(path: &str, modified: NaiveDate) -> ScanResult {
    ScanResult {
        folder_path: path.to_string(),
        modified_date: Some(modified),
        detected_as_simulation: true,
        external_category: None,
    }
}

// ── Mark pass ─────────────────────────────────────────────────────────────

#[test]
fn mark_pass_rebuckets_every_folder() {
    let store = seed_store();
    // Long overdue: expiration lands well before the round start.
    let overdue = add_folder(&store, "r1/old", Some(Q1), None, Some(date(2024, 11, 1)));
    // Fresh: modified two days before the round, five day cycle.
    let fresh = add_folder(&store, "r1/new", Some(MARKED), None, Some(date(2024, 12, 30)));

    let updated = run_mark_pass(&store, 1, round_start(), 5).unwrap();
    assert_eq!(updated, 2);

    let overdue = store.get_folder_by_path(1, &overdue.path).unwrap().unwrap();
    assert_eq!(overdue.retention_id, Some(MARKED));
    let fresh = store.get_folder_by_path(1, &fresh.path).unwrap().unwrap();
    assert_eq!(fresh.retention_id, Some(NEXT));
    assert_eq!(fresh.expiration_date, Some(date(2025, 1, 4)));
}

#[test]
fn mark_pass_fails_on_folder_without_dates() {
    let store = seed_store();
    add_folder(&store, "r1/ghost", Some(Q1), None, None);
    assert!(run_mark_pass(&store, 1, round_start(), 5).is_err());
}

// ── Unmark pass ───────────────────────────────────────────────────────────

#[test]
fn unmark_pass_postpones_only_marked_folders() {
    let store = seed_store();
    let marked = add_folder(
        &store,
        "r1/due",
        Some(MARKED),
        Some(date(2024, 12, 20)),
        Some(date(2024, 12, 15)),
    );
    let untouched = add_folder(
        &store,
        "r1/fine",
        Some(Q1),
        Some(date(2025, 3, 1)),
        Some(date(2024, 12, 15)),
    );

    let postponed = run_unmark_pass(&store, 1).unwrap();
    assert_eq!(postponed, 1);

    let marked = store.get_folder_by_path(1, &marked.path).unwrap().unwrap();
    assert_eq!(marked.retention_id, Some(NEXT));
    // Expiration and modified date survive the postponement.
    assert_eq!(marked.expiration_date, Some(date(2024, 12, 20)));
    assert_eq!(marked.modified_date, Some(date(2024, 12, 15)));

    let untouched = store.get_folder_by_path(1, &untouched.path).unwrap().unwrap();
    assert_eq!(untouched.retention_id, Some(Q1));
}

// ── Scan application ──────────────────────────────────────────────────────

#[test]
fn scan_application_creates_unseen_folders() {
    let store = seed_store();
    let applied = apply_scan_results(
        &store,
        1,
        &[scan("r1/brand_new", date(2024, 12, 30))],
        round_start(),
        5,
        false,
    )
    .unwrap();
    assert_eq!(applied, 1);

    let folder = store.get_folder_by_path(1, "r1/brand_new").unwrap().unwrap();
    assert_eq!(folder.retention_id, Some(NEXT));
    assert_eq!(folder.expiration_date, Some(date(2025, 1, 4)));
    assert_eq!(folder.modified_date, Some(date(2024, 12, 30)));
}

#[test]
fn scan_application_skips_non_simulation_entries() {
    let store = seed_store();
    let mut results = vec![scan("r1/sim", date(2024, 12, 30))];
    results.push(ScanResult {
        folder_path: "r1/not_a_sim".to_string(),
        modified_date: Some(date(2024, 12, 30)),
        detected_as_simulation: false,
        external_category: None,
    });

    let applied = apply_scan_results(&store, 1, &results, round_start(), 5, false).unwrap();
    assert_eq!(applied, 1);
    assert!(store.get_folder_by_path(1, "r1/not_a_sim").unwrap().is_none());
}

#[test]
fn scan_application_honours_path_protection() {
    let store = seed_store();
    store
        .add_protection(PathProtection {
            id: 11,
            rootfolder_id: 1,
            folder_id: 1,
            path: "r1/keep".to_string(),
        })
        .unwrap();

    apply_scan_results(
        &store,
        1,
        &[scan("r1/keep/run42", date(2024, 12, 30))],
        round_start(),
        5,
        false,
    )
    .unwrap();

    let folder = store.get_folder_by_path(1, "r1/keep/run42").unwrap().unwrap();
    assert_eq!(folder.retention_id, Some(2));
    assert_eq!(folder.path_protection_id, Some(11));
    assert_eq!(folder.expiration_date, None);
}

#[test]
fn scan_application_applies_endstage_category() {
    let store = seed_store();
    add_folder(
        &store,
        "r1/finished",
        Some(Q1),
        Some(date(2025, 3, 1)),
        Some(date(2024, 12, 1)),
    );

    let mut result = scan("r1/finished", date(2024, 12, 1));
    result.external_category = Some(ExternalRetentionCategory::Clean);
    apply_scan_results(&store, 1, &[result], round_start(), 5, false).unwrap();

    let folder = store.get_folder_by_path(1, "r1/finished").unwrap().unwrap();
    assert_eq!(folder.retention_id, Some(CLEAN));
    assert_eq!(folder.expiration_date, None);
}
