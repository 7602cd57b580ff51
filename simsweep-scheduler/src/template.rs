//! The fixed, ordered task template for one cleanup round.

use simsweep_core::constants::{LONG_TASK_MAX_HOURS, SHORT_TASK_MAX_HOURS};
use simsweep_core::models::{ActionType, Progress};

/// Blueprint for one task in the round, in template order.
///
/// `precondition_states` gate reservation; `target_state` is the
/// progress the configuration moves to (on reservation, when
/// `state_transition_on_reservation`) and the state verified at
/// completion (when `state_verification_on_completion`).
#[derive(Debug, Clone)]
pub struct TaskTemplate {
    pub action_type: ActionType,
    /// Days from the calendar start date before the task may be created.
    pub task_offset: i64,
    pub needs_storage: bool,
    pub max_execution_hours: i64,
    pub precondition_states: Vec<Progress>,
    pub target_state: Option<Progress>,
    pub state_transition_on_reservation: bool,
    pub state_verification_on_completion: bool,
}

/// The seven tasks of one round, in execution order.
///
/// `cycle_time` is the review window in days: the final notification
/// lands shortly before it closes, cleaning starts when it has elapsed,
/// and the unmark/finalise pair follow the day after.
pub fn round_template(cycle_time: i64) -> Vec<TaskTemplate> {
    let review_closing = (cycle_time - 2).max(1);
    let clean_day = cycle_time.max(1);
    vec![
        TaskTemplate {
            action_type: ActionType::Scan,
            task_offset: 0,
            needs_storage: true,
            max_execution_hours: LONG_TASK_MAX_HOURS,
            precondition_states: vec![Progress::Inactive, Progress::Done],
            target_state: Some(Progress::Scanning),
            state_transition_on_reservation: true,
            state_verification_on_completion: true,
        },
        TaskTemplate {
            action_type: ActionType::MarkForReview,
            task_offset: 1,
            needs_storage: false,
            max_execution_hours: SHORT_TASK_MAX_HOURS,
            precondition_states: vec![Progress::Scanning],
            target_state: Some(Progress::MarkingForReview),
            state_transition_on_reservation: true,
            state_verification_on_completion: true,
        },
        // Carries the round into the review phase: going into review
        // without notifying the users would not be acceptable.
        TaskTemplate {
            action_type: ActionType::SendInitialNotification,
            task_offset: 1,
            needs_storage: false,
            max_execution_hours: SHORT_TASK_MAX_HOURS,
            precondition_states: vec![Progress::MarkingForReview],
            target_state: Some(Progress::RetentionReview),
            state_transition_on_reservation: true,
            state_verification_on_completion: true,
        },
        TaskTemplate {
            action_type: ActionType::SendFinalNotification,
            task_offset: review_closing,
            needs_storage: false,
            max_execution_hours: SHORT_TASK_MAX_HOURS,
            precondition_states: vec![Progress::RetentionReview],
            // No state change: the review keeps running until cleaning.
            target_state: Some(Progress::RetentionReview),
            state_transition_on_reservation: false,
            state_verification_on_completion: true,
        },
        TaskTemplate {
            action_type: ActionType::Clean,
            task_offset: clean_day,
            needs_storage: true,
            max_execution_hours: LONG_TASK_MAX_HOURS,
            precondition_states: vec![Progress::RetentionReview],
            target_state: Some(Progress::Cleaning),
            state_transition_on_reservation: true,
            state_verification_on_completion: true,
        },
        TaskTemplate {
            action_type: ActionType::UnmarkAfterReview,
            task_offset: clean_day + 1,
            needs_storage: false,
            max_execution_hours: SHORT_TASK_MAX_HOURS,
            precondition_states: vec![Progress::Cleaning],
            target_state: Some(Progress::UnmarkingAfterReview),
            state_transition_on_reservation: true,
            state_verification_on_completion: true,
        },
        TaskTemplate {
            action_type: ActionType::Finalise,
            task_offset: clean_day + 1,
            needs_storage: false,
            max_execution_hours: SHORT_TASK_MAX_HOURS,
            precondition_states: vec![Progress::UnmarkingAfterReview],
            target_state: Some(Progress::Done),
            state_transition_on_reservation: true,
            state_verification_on_completion: true,
        },
    ]
}
