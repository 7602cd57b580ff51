pub mod retention_error;
pub mod scheduler_error;
pub mod store_error;

pub use retention_error::RetentionError;
pub use scheduler_error::SchedulerError;
pub use store_error::StoreError;

/// Aggregate error type for all simsweep operations.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error(transparent)]
    Retention(#[from] RetentionError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias used across the workspace.
pub type SweepResult<T> = Result<T, SweepError>;
