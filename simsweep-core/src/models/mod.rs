pub mod agent;
pub mod calendar;
pub mod configuration;
pub mod folder;
pub mod ids;
pub mod path_protection;
pub mod progress;
pub mod retention_decision;
pub mod retention_type;
pub mod root_folder;
pub mod scan_result;
pub mod task;

pub use agent::AgentInfo;
pub use calendar::{CalendarStatus, CleanupCalendar};
pub use configuration::CleanupConfiguration;
pub use folder::Folder;
pub use ids::{CalendarId, FolderId, PathProtectionId, RetentionId, RootFolderId, TaskId};
pub use path_protection::PathProtection;
pub use progress::Progress;
pub use retention_decision::RetentionDecision;
pub use retention_type::{ExternalRetentionCategory, RetentionType};
pub use root_folder::RootFolder;
pub use scan_result::ScanResult;
pub use task::{ActionType, CleanupTask, TaskStatus};
