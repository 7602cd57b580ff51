//! # simsweep-core
//!
//! Foundation crate for the simsweep cleanup engine.
//! Defines all models, traits, errors, and constants.
//! Every other crate in the workspace depends on this.

pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use errors::{SweepError, SweepResult};
pub use models::{
    ActionType, AgentInfo, CalendarStatus, CleanupCalendar, CleanupConfiguration, CleanupTask,
    ExternalRetentionCategory, Folder, PathProtection, Progress, RetentionDecision, RetentionType,
    RootFolder, ScanResult, TaskStatus,
};
pub use traits::ICleanupStore;
