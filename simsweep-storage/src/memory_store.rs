use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};

use simsweep_core::errors::{StoreError, SweepResult};
use simsweep_core::models::{
    CalendarId, CalendarStatus, CleanupCalendar, CleanupConfiguration, CleanupTask, Folder,
    FolderId, PathProtection, Progress, RetentionDecision, RetentionId, RetentionType, RootFolder,
    RootFolderId, TaskId, TaskStatus,
};
use simsweep_core::traits::ICleanupStore;

#[derive(Default)]
struct Inner {
    rootfolders: HashMap<RootFolderId, RootFolder>,
    configurations: HashMap<RootFolderId, CleanupConfiguration>,
    retention_types: HashMap<RootFolderId, Vec<RetentionType>>,
    protections: HashMap<RootFolderId, Vec<PathProtection>>,
    folders: Vec<Folder>,
    calendars: Vec<CleanupCalendar>,
    tasks: Vec<CleanupTask>,
    next_folder_id: FolderId,
    next_calendar_id: CalendarId,
    next_task_id: TaskId,
}

/// In-memory [`ICleanupStore`] backed by a single mutex.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_folder_id: 1,
                next_calendar_id: 1,
                next_task_id: 1,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> SweepResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| {
            StoreError::Backend {
                message: "store mutex poisoned".to_string(),
            }
            .into()
        })
    }

    // --- Seed helpers ---

    pub fn add_rootfolder(&self, rootfolder: RootFolder) -> SweepResult<()> {
        self.lock()?.rootfolders.insert(rootfolder.id, rootfolder);
        Ok(())
    }

    pub fn add_configuration(&self, config: CleanupConfiguration) -> SweepResult<()> {
        self.lock()?
            .configurations
            .insert(config.rootfolder_id, config);
        Ok(())
    }

    pub fn add_catalog(
        &self,
        rootfolder_id: RootFolderId,
        types: Vec<RetentionType>,
    ) -> SweepResult<()> {
        self.lock()?.retention_types.insert(rootfolder_id, types);
        Ok(())
    }

    pub fn add_protection(&self, protection: PathProtection) -> SweepResult<()> {
        self.lock()?
            .protections
            .entry(protection.rootfolder_id)
            .or_default()
            .push(protection);
        Ok(())
    }

    pub fn add_folder(&self, mut folder: Folder) -> SweepResult<Folder> {
        let mut inner = self.lock()?;
        folder.id = inner.next_folder_id;
        inner.next_folder_id += 1;
        inner.folders.push(folder.clone());
        Ok(folder)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ICleanupStore for MemoryStore {
    fn list_configurations(&self) -> SweepResult<Vec<CleanupConfiguration>> {
        let inner = self.lock()?;
        let mut configs: Vec<_> = inner.configurations.values().cloned().collect();
        configs.sort_by_key(|c| c.rootfolder_id);
        Ok(configs)
    }

    fn get_configuration(
        &self,
        rootfolder_id: RootFolderId,
    ) -> SweepResult<CleanupConfiguration> {
        self.lock()?
            .configurations
            .get(&rootfolder_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound {
                    entity: "configuration",
                    id: rootfolder_id,
                }
                .into()
            })
    }

    fn update_configuration(&self, config: &CleanupConfiguration) -> SweepResult<()> {
        let mut inner = self.lock()?;
        if !inner.configurations.contains_key(&config.rootfolder_id) {
            return Err(StoreError::NotFound {
                entity: "configuration",
                id: config.rootfolder_id,
            }
            .into());
        }
        inner
            .configurations
            .insert(config.rootfolder_id, config.clone());
        Ok(())
    }

    fn update_configuration_progress(
        &self,
        rootfolder_id: RootFolderId,
        progress: Progress,
    ) -> SweepResult<()> {
        let mut inner = self.lock()?;
        match inner.configurations.get_mut(&rootfolder_id) {
            Some(config) => {
                config.progress = progress;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "configuration",
                id: rootfolder_id,
            }
            .into()),
        }
    }

    fn get_rootfolder(&self, rootfolder_id: RootFolderId) -> SweepResult<RootFolder> {
        self.lock()?
            .rootfolders
            .get(&rootfolder_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound {
                    entity: "rootfolder",
                    id: rootfolder_id,
                }
                .into()
            })
    }

    fn active_calendar(
        &self,
        rootfolder_id: RootFolderId,
    ) -> SweepResult<Option<CleanupCalendar>> {
        Ok(self
            .lock()?
            .calendars
            .iter()
            .find(|c| c.rootfolder_id == rootfolder_id && c.status == CalendarStatus::Active)
            .cloned())
    }

    fn list_active_calendars(&self) -> SweepResult<Vec<CleanupCalendar>> {
        Ok(self
            .lock()?
            .calendars
            .iter()
            .filter(|c| c.status == CalendarStatus::Active)
            .cloned()
            .collect())
    }

    fn get_calendar(&self, calendar_id: CalendarId) -> SweepResult<CleanupCalendar> {
        self.lock()?
            .calendars
            .iter()
            .find(|c| c.id == calendar_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound {
                    entity: "calendar",
                    id: calendar_id,
                }
                .into()
            })
    }

    fn create_calendar(
        &self,
        rootfolder_id: RootFolderId,
        start_date: NaiveDate,
    ) -> SweepResult<CleanupCalendar> {
        let mut inner = self.lock()?;
        let calendar = CleanupCalendar {
            id: inner.next_calendar_id,
            rootfolder_id,
            start_date,
            status: CalendarStatus::Active,
        };
        inner.next_calendar_id += 1;
        inner.calendars.push(calendar.clone());
        Ok(calendar)
    }

    fn update_calendar_status(
        &self,
        calendar_id: CalendarId,
        status: CalendarStatus,
    ) -> SweepResult<()> {
        let mut inner = self.lock()?;
        match inner.calendars.iter_mut().find(|c| c.id == calendar_id) {
            Some(calendar) => {
                calendar.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "calendar",
                id: calendar_id,
            }
            .into()),
        }
    }

    fn tasks_for_calendar(&self, calendar_id: CalendarId) -> SweepResult<Vec<CleanupTask>> {
        let inner = self.lock()?;
        let mut tasks: Vec<_> = inner
            .tasks
            .iter()
            .filter(|t| t.calendar_id == calendar_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    fn get_task(&self, task_id: TaskId) -> SweepResult<CleanupTask> {
        self.lock()?
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound {
                    entity: "task",
                    id: task_id,
                }
                .into()
            })
    }

    fn create_task(&self, mut task: CleanupTask) -> SweepResult<CleanupTask> {
        let mut inner = self.lock()?;
        task.id = inner.next_task_id;
        inner.next_task_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    fn list_activated_tasks(&self) -> SweepResult<Vec<CleanupTask>> {
        let inner = self.lock()?;
        let mut tasks: Vec<_> = inner
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Activated)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    fn update_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        message: Option<String>,
        completed_at: Option<DateTime<Utc>>,
    ) -> SweepResult<()> {
        let mut inner = self.lock()?;
        match inner.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.status = status;
                if message.is_some() {
                    task.status_message = message;
                }
                if completed_at.is_some() {
                    task.completed_at = completed_at;
                }
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "task",
                id: task_id,
            }
            .into()),
        }
    }

    fn try_reserve_task(
        &self,
        task_id: TaskId,
        agent_id: &str,
        now: DateTime<Utc>,
    ) -> SweepResult<bool> {
        // The whole read-check-write happens under the one mutex, which
        // is what makes the claim atomic for concurrent agents.
        let mut inner = self.lock()?;
        match inner.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) if task.status == TaskStatus::Activated => {
                task.status = TaskStatus::Reserved;
                task.reserved_by_agent_id = Some(agent_id.to_string());
                task.reserved_at = Some(now);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(StoreError::NotFound {
                entity: "task",
                id: task_id,
            }
            .into()),
        }
    }

    fn retention_catalog(&self, rootfolder_id: RootFolderId) -> SweepResult<Vec<RetentionType>> {
        Ok(self
            .lock()?
            .retention_types
            .get(&rootfolder_id)
            .cloned()
            .unwrap_or_default())
    }

    fn path_protections(&self, rootfolder_id: RootFolderId) -> SweepResult<Vec<PathProtection>> {
        Ok(self
            .lock()?
            .protections
            .get(&rootfolder_id)
            .cloned()
            .unwrap_or_default())
    }

    fn folders(&self, rootfolder_id: RootFolderId) -> SweepResult<Vec<Folder>> {
        Ok(self
            .lock()?
            .folders
            .iter()
            .filter(|f| f.rootfolder_id == rootfolder_id)
            .cloned()
            .collect())
    }

    fn get_folder_by_path(
        &self,
        rootfolder_id: RootFolderId,
        path: &str,
    ) -> SweepResult<Option<Folder>> {
        Ok(self
            .lock()?
            .folders
            .iter()
            .find(|f| f.rootfolder_id == rootfolder_id && f.path == path)
            .cloned())
    }

    fn upsert_folder(&self, mut folder: Folder) -> SweepResult<Folder> {
        let mut inner = self.lock()?;
        if let Some(existing) = inner
            .folders
            .iter_mut()
            .find(|f| f.rootfolder_id == folder.rootfolder_id && f.path == folder.path)
        {
            folder.id = existing.id;
            *existing = folder.clone();
            return Ok(folder);
        }
        folder.id = inner.next_folder_id;
        inner.next_folder_id += 1;
        inner.folders.push(folder.clone());
        Ok(folder)
    }

    fn apply_decision(
        &self,
        folder_id: FolderId,
        decision: RetentionDecision,
        modified_date: Option<NaiveDate>,
    ) -> SweepResult<()> {
        let mut inner = self.lock()?;
        match inner.folders.iter_mut().find(|f| f.id == folder_id) {
            Some(folder) => {
                folder.apply_decision(decision);
                folder.modified_date = modified_date;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                entity: "folder",
                id: folder_id,
            }
            .into()),
        }
    }

    fn marked_folders(
        &self,
        rootfolder_id: RootFolderId,
        marked_id: RetentionId,
    ) -> SweepResult<Vec<Folder>> {
        Ok(self
            .lock()?
            .folders
            .iter()
            .filter(|f| f.rootfolder_id == rootfolder_id && f.retention_id == Some(marked_id))
            .cloned()
            .collect())
    }
}
