/// Scheduler and reservation-protocol errors.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("agent '{agent_id}' declares no action types")]
    InvalidAgent { agent_id: String },

    #[error("task {task_id} not found")]
    TaskNotFound { task_id: i64 },

    #[error("invalid completion status '{status}': must be terminal")]
    InvalidStatus { status: String },

    #[error("task {task_id} is {status}, not reserved, and cannot be completed")]
    TaskNotReserved { task_id: i64, status: String },

    #[error("invalid progress transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("task {task_id} precondition failed: progress is {progress}")]
    PreconditionFailed { task_id: i64, progress: String },

    #[error("task {task_id} state verification failed: expected {expected}, found {found}")]
    StateVerificationFailed {
        task_id: i64,
        expected: String,
        found: String,
    },
}
