//! Integer id aliases for the persisted entities.

pub type RootFolderId = i64;
pub type FolderId = i64;
pub type RetentionId = i64;
pub type PathProtectionId = i64;
pub type CalendarId = i64;
pub type TaskId = i64;
