//! Property tests for the retention calculator invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use simsweep_core::models::{
    ExternalRetentionCategory, PathProtection, RetentionType, ScanResult,
};
use simsweep_retention::{
    CurrentRetention, PathProtectionIndex, RetentionCalculator, RetentionCatalog,
};

const UNDEFINED: i64 = 1;
const PATH: i64 = 2;
const MARKED: i64 = 3;

fn retention_type(id: i64, name: &str, days: Option<i64>, endstage: bool) -> RetentionType {
    RetentionType {
        id,
        name: name.to_string(),
        days_to_cleanup: days,
        is_endstage: endstage,
        display_rank: id as i32,
    }
}

fn catalog() -> RetentionCatalog {
    RetentionCatalog::new(vec![
        retention_type(UNDEFINED, "?", None, false),
        retention_type(PATH, "path", None, false),
        retention_type(MARKED, "marked", Some(0), false),
        retention_type(4, "next", Some(7), false),
        retention_type(5, "q1", Some(90), false),
        retention_type(6, "q2", Some(180), false),
        retention_type(7, "clean", None, true),
        retention_type(8, "issue", None, true),
        retention_type(9, "missing", None, true),
    ])
    .unwrap()
}

fn round_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    round_start() + Duration::days(offset)
}

fn category_strategy() -> impl Strategy<Value = Option<ExternalRetentionCategory>> {
    prop_oneof![
        Just(None),
        Just(Some(ExternalRetentionCategory::Numeric)),
        Just(Some(ExternalRetentionCategory::Clean)),
        Just(Some(ExternalRetentionCategory::Issue)),
        Just(Some(ExternalRetentionCategory::Missing)),
    ]
}

// =============================================================================
// Monotonic expiration: non-decreasing modified dates never pull the
// deadline in.
// =============================================================================
proptest! {
    #[test]
    fn expiration_never_decreases(
        mut offsets in prop::collection::vec(-400_i64..400, 1..12),
        cycle_time in 1_i64..60,
    ) {
        offsets.sort_unstable();
        let cat = catalog();
        let idx = PathProtectionIndex::new(vec![]);
        let calc = RetentionCalculator::new(&cat, &idx, round_start(), cycle_time, false);

        let mut current = CurrentRetention {
            retention_id: None,
            path_protection_id: None,
            expiration_date: None,
        };
        let mut modified: Option<NaiveDate> = None;
        let mut last_expiration: Option<NaiveDate> = None;

        for offset in offsets {
            let new_modified = Some(day(offset));
            let decision = calc
                .adjust_from_scan("r1/sim", current, modified, new_modified)
                .unwrap();
            if let (Some(prev), Some(next)) = (last_expiration, decision.expiration_date) {
                prop_assert!(next >= prev, "expiration moved from {prev} back to {next}");
            }
            last_expiration = decision.expiration_date;
            current = CurrentRetention {
                retention_id: Some(decision.retention_id),
                path_protection_id: decision.path_protection_id,
                expiration_date: decision.expiration_date,
            };
            modified = new_modified;
        }
    }
}

// =============================================================================
// Path protection precedence: any folder under a protected subtree gets
// the path retention, whatever the scan says.
// =============================================================================
proptest! {
    #[test]
    fn protected_paths_always_win(
        suffix in "[a-z][a-z0-9]{0,8}(/[a-z][a-z0-9]{0,8}){0,3}",
        modified_offset in -200_i64..200,
        category in category_strategy(),
    ) {
        let cat = catalog();
        let idx = PathProtectionIndex::new(vec![PathProtection {
            id: 42,
            rootfolder_id: 1,
            folder_id: 1,
            path: "r1/keep".to_string(),
        }]);
        let calc = RetentionCalculator::new(&cat, &idx, round_start(), 5, false);

        let scan = ScanResult {
            folder_path: format!("r1/keep/{suffix}"),
            modified_date: Some(day(modified_offset)),
            detected_as_simulation: true,
            external_category: category,
        };
        let current = CurrentRetention {
            retention_id: None,
            path_protection_id: None,
            expiration_date: None,
        };
        let (decision, _) = calc
            .calculate_from_scan_result(current, Some(day(-10)), &scan)
            .unwrap();
        prop_assert_eq!(decision.retention_id, PATH);
        prop_assert_eq!(decision.path_protection_id, Some(42));
        prop_assert_eq!(decision.expiration_date, None);
    }
}

// =============================================================================
// Bucket assignment: the chosen threshold covers days_to_expiration or
// is the last bucket.
// =============================================================================
proptest! {
    #[test]
    fn bucket_covers_days_or_clamps(days in -500_i64..500) {
        let cat = catalog();
        let bucket = cat.bucket_for(days);
        let thresholds = cat.numeric_thresholds();
        let (last_id, _) = thresholds[thresholds.len() - 1];
        let chosen = thresholds.iter().find(|&&(id, _)| id == bucket).unwrap();
        if bucket != last_id {
            prop_assert!(chosen.1 >= days);
            // And it is the lowest such threshold.
            for &(_, d) in thresholds {
                if d >= days {
                    prop_assert!(chosen.1 <= d);
                }
            }
        } else {
            prop_assert!(chosen.1 >= days || thresholds.iter().all(|&(_, d)| d < days));
        }
    }
}

// =============================================================================
// No re-marking mid-round: a folder not currently marked never comes
// back marked outside the recompute-all phase.
// =============================================================================
proptest! {
    #[test]
    fn mid_round_never_returns_to_marked(
        current_id in prop_oneof![Just(None), Just(Some(UNDEFINED)), Just(Some(4_i64)), Just(Some(5_i64))],
        modified_offset in -400_i64..100,
        new_offset in prop_oneof![Just(None), (-400_i64..100).prop_map(Some)],
        cycle_time in 1_i64..30,
    ) {
        let cat = catalog();
        let idx = PathProtectionIndex::new(vec![]);
        let calc = RetentionCalculator::new(&cat, &idx, round_start(), cycle_time, false);

        let current = CurrentRetention {
            retention_id: current_id,
            path_protection_id: None,
            expiration_date: None,
        };
        let decision = calc
            .adjust_from_scan(
                "r1/sim",
                current,
                Some(day(modified_offset)),
                new_offset.map(day),
            )
            .unwrap();
        prop_assert_ne!(decision.retention_id, MARKED);
    }
}
