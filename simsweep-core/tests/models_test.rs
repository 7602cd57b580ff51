use chrono::{Duration, NaiveDate, TimeZone, Utc};

use simsweep_core::models::*;

fn roundtrip<T: serde::Serialize + serde::de::DeserializeOwned>(val: &T) -> T {
    let json = serde_json::to_string(val).unwrap();
    serde_json::from_str(&json).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Progress state machine ────────────────────────────────────────────────

#[test]
fn progress_forward_cycle_is_legal() {
    let mut state = Progress::Inactive;
    for _ in 0..7 {
        let next = state.next_natural_state();
        assert!(state.can_transition_to(next), "{state} -> {next}");
        state = next;
    }
    // After one full lap the cycle restarts at Scanning.
    assert_eq!(Progress::Done.next_natural_state(), Progress::Scanning);
}

#[test]
fn progress_skipping_ahead_is_illegal() {
    assert!(!Progress::Inactive.can_transition_to(Progress::Cleaning));
    assert!(!Progress::Scanning.can_transition_to(Progress::RetentionReview));
    let err = Progress::Scanning.transition_to(Progress::Done).unwrap_err();
    assert!(err.to_string().contains("scanning"));
}

#[test]
fn progress_aborts_to_inactive_from_any_active_state() {
    for state in [
        Progress::Scanning,
        Progress::MarkingForReview,
        Progress::RetentionReview,
        Progress::Cleaning,
        Progress::UnmarkingAfterReview,
        Progress::Done,
    ] {
        assert!(state.can_transition_to(Progress::Inactive), "{state}");
    }
    assert!(!Progress::Inactive.can_transition_to(Progress::Inactive));
}

#[test]
fn progress_string_edges_roundtrip() {
    for state in [
        Progress::Inactive,
        Progress::MarkingForReview,
        Progress::UnmarkingAfterReview,
    ] {
        assert_eq!(state.as_str().parse::<Progress>(), Ok(state));
    }
    assert!("paused".parse::<Progress>().is_err());
}

// ── Configuration readiness ───────────────────────────────────────────────

#[test]
fn configuration_readiness_needs_idle_progress_and_arrived_date() {
    let mut config = CleanupConfiguration::new(1);
    let today = date(2025, 1, 15);
    assert!(!config.is_ready_to_start(today));

    config.cycle_time = 5;
    config.frequency = 30;
    config.start_date = Some(date(2025, 1, 15));
    assert!(config.is_ready_to_start(today));

    config.start_date = Some(date(2025, 1, 16));
    assert!(!config.is_ready_to_start(today));

    config.start_date = Some(date(2025, 1, 1));
    config.progress = Progress::Scanning;
    assert!(!config.is_ready_to_start(today));
    config.progress = Progress::Done;
    assert!(config.is_ready_to_start(today));
}

// ── Task lease ────────────────────────────────────────────────────────────

fn task() -> CleanupTask {
    CleanupTask {
        id: 1,
        calendar_id: 1,
        rootfolder_id: 1,
        action_type: ActionType::Scan,
        storage_id: Some("st1".into()),
        status: TaskStatus::Reserved,
        scheduled_date: date(2025, 1, 1),
        task_offset: 0,
        max_execution_hours: 48,
        precondition_states: vec![Progress::Inactive, Progress::Done],
        target_state: Some(Progress::Scanning),
        state_transition_on_reservation: true,
        state_verification_on_completion: true,
        reserved_by_agent_id: Some("scanner-1".into()),
        reserved_at: Some(Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()),
        completed_at: None,
        status_message: None,
    }
}

#[test]
fn task_expires_only_past_its_window() {
    let task = task();
    let reserved_at = task.reserved_at.unwrap();
    assert!(!task.is_expired(reserved_at + Duration::hours(47)));
    assert!(task.is_expired(reserved_at + Duration::hours(49)));
}

#[test]
fn unreserved_task_never_expires() {
    let mut task = task();
    task.status = TaskStatus::Activated;
    task.reserved_at = None;
    assert!(!task.is_expired(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));
}

#[test]
fn task_roundtrip() {
    let t = task();
    let r = roundtrip(&t);
    assert_eq!(r, t);
    // Wire names stay snake_case.
    let json = serde_json::to_string(&t).unwrap();
    assert!(json.contains("\"scan\""));
    assert!(json.contains("\"reserved\""));
}

// ── Agent storage capability ──────────────────────────────────────────────

#[test]
fn agent_storage_support_is_symmetric() {
    let with_storage = AgentInfo {
        agent_id: "scanner-1".into(),
        action_types: vec![ActionType::Scan],
        supported_storage_ids: vec!["st1".into(), "st2".into()],
    };
    assert!(with_storage.supports_storage(Some("st2")));
    assert!(!with_storage.supports_storage(Some("st9")));
    assert!(!with_storage.supports_storage(None));

    let without = AgentInfo {
        agent_id: "notifier".into(),
        action_types: vec![ActionType::SendInitialNotification],
        supported_storage_ids: vec![],
    };
    assert!(without.supports_storage(None));
    assert!(!without.supports_storage(Some("st1")));
}

// ── Folder decisions ──────────────────────────────────────────────────────

#[test]
fn folder_decision_roundtrips_through_apply() {
    let mut folder = Folder {
        id: 1,
        rootfolder_id: 1,
        path: "r1/sim1".into(),
        retention_id: None,
        expiration_date: None,
        modified_date: Some(date(2024, 12, 1)),
        path_protection_id: None,
    };
    assert!(folder.current_decision().is_none());

    let decision = RetentionDecision {
        retention_id: 4,
        path_protection_id: Some(7),
        expiration_date: Some(date(2025, 1, 10)),
    };
    folder.apply_decision(decision);
    assert_eq!(folder.current_decision(), Some(decision));
}

// ── External categories ───────────────────────────────────────────────────

#[test]
fn external_category_string_edges() {
    assert_eq!(
        "clean".parse::<ExternalRetentionCategory>().ok(),
        Some(ExternalRetentionCategory::Clean)
    );
    assert!(ExternalRetentionCategory::Issue.is_endstage());
    assert!(!ExternalRetentionCategory::Numeric.is_endstage());
    assert!("weird".parse::<ExternalRetentionCategory>().is_err());
}
