use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::SweepResult;
use crate::models::{
    CalendarId, CalendarStatus, CleanupCalendar, CleanupConfiguration, CleanupTask, Folder,
    FolderId, PathProtection, Progress, RetentionDecision, RetentionId, RetentionType, RootFolder,
    RootFolderId, TaskId, TaskStatus,
};

/// Persistence contract for the cleanup engine.
///
/// Every scheduler and calculator pass takes this as `&dyn ICleanupStore`;
/// the store's lifecycle is owned by the process entry point. Any durable
/// relational store can implement it.
pub trait ICleanupStore: Send + Sync {
    // --- Configurations ---
    fn list_configurations(&self) -> SweepResult<Vec<CleanupConfiguration>>;
    fn get_configuration(&self, rootfolder_id: RootFolderId)
        -> SweepResult<CleanupConfiguration>;
    fn update_configuration(&self, config: &CleanupConfiguration) -> SweepResult<()>;
    fn update_configuration_progress(
        &self,
        rootfolder_id: RootFolderId,
        progress: Progress,
    ) -> SweepResult<()>;

    // --- Rootfolders ---
    fn get_rootfolder(&self, rootfolder_id: RootFolderId) -> SweepResult<RootFolder>;

    // --- Calendars ---
    fn active_calendar(
        &self,
        rootfolder_id: RootFolderId,
    ) -> SweepResult<Option<CleanupCalendar>>;
    fn list_active_calendars(&self) -> SweepResult<Vec<CleanupCalendar>>;
    fn get_calendar(&self, calendar_id: CalendarId) -> SweepResult<CleanupCalendar>;
    fn create_calendar(
        &self,
        rootfolder_id: RootFolderId,
        start_date: NaiveDate,
    ) -> SweepResult<CleanupCalendar>;
    fn update_calendar_status(
        &self,
        calendar_id: CalendarId,
        status: CalendarStatus,
    ) -> SweepResult<()>;

    // --- Tasks ---
    /// Tasks for one calendar in creation order.
    fn tasks_for_calendar(&self, calendar_id: CalendarId) -> SweepResult<Vec<CleanupTask>>;
    fn get_task(&self, task_id: TaskId) -> SweepResult<CleanupTask>;
    fn create_task(&self, task: CleanupTask) -> SweepResult<CleanupTask>;
    fn list_activated_tasks(&self) -> SweepResult<Vec<CleanupTask>>;
    fn update_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        message: Option<String>,
        completed_at: Option<DateTime<Utc>>,
    ) -> SweepResult<()>;
    /// Atomically claim an Activated task for `agent_id`. Returns false
    /// if the task is no longer Activated (lost race). This single
    /// read-modify-write is the at-most-one-agent-per-task guarantee.
    fn try_reserve_task(
        &self,
        task_id: TaskId,
        agent_id: &str,
        now: DateTime<Utc>,
    ) -> SweepResult<bool>;

    // --- Retention data ---
    fn retention_catalog(&self, rootfolder_id: RootFolderId) -> SweepResult<Vec<RetentionType>>;
    fn path_protections(&self, rootfolder_id: RootFolderId) -> SweepResult<Vec<PathProtection>>;
    fn folders(&self, rootfolder_id: RootFolderId) -> SweepResult<Vec<Folder>>;
    fn get_folder_by_path(
        &self,
        rootfolder_id: RootFolderId,
        path: &str,
    ) -> SweepResult<Option<Folder>>;
    fn upsert_folder(&self, folder: Folder) -> SweepResult<Folder>;
    /// Apply a retention decision (and optionally a new modified date)
    /// to one folder record.
    fn apply_decision(
        &self,
        folder_id: FolderId,
        decision: RetentionDecision,
        modified_date: Option<NaiveDate>,
    ) -> SweepResult<()>;
    /// Folders currently carrying the marked retention id.
    fn marked_folders(
        &self,
        rootfolder_id: RootFolderId,
        marked_id: RetentionId,
    ) -> SweepResult<Vec<Folder>>;
}
