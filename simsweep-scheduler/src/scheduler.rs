//! Just-in-time task scheduling and calendar reconciliation.
//!
//! The scheduler is a periodic, single-threaded pass driven by an
//! external timer. Every check re-reads current status before acting,
//! so re-running a tick after a crash is safe.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{info, warn};

use simsweep_core::errors::SweepResult;
use simsweep_core::models::{
    CalendarStatus, CleanupCalendar, CleanupConfiguration, CleanupTask, Progress, RootFolderId,
    TaskStatus,
};
use simsweep_core::traits::ICleanupStore;

use crate::template::round_template;

/// Orchestrates cleanup calendars and their tasks.
pub struct CleanupScheduler;

impl CleanupScheduler {
    /// Start a round for every configuration that is ready and has no
    /// active calendar. A configuration resting in Done gets its start
    /// date advanced to today first, so newly arrived data is in scope.
    /// Returns the number of calendars created.
    pub fn create_calendars_ready_to_start(
        store: &dyn ICleanupStore,
        today: NaiveDate,
    ) -> SweepResult<usize> {
        let mut created = 0;
        for mut config in store.list_configurations()? {
            if !config.is_ready_to_start(today) {
                continue;
            }
            if store.active_calendar(config.rootfolder_id)?.is_some() {
                continue;
            }
            if config.progress == Progress::Done {
                config.start_date = Some(today);
                store.update_configuration(&config)?;
            }
            let start_date = match config.start_date {
                Some(date) => date,
                None => continue,
            };
            let calendar = store.create_calendar(config.rootfolder_id, start_date)?;
            info!(
                rootfolder_id = config.rootfolder_id,
                calendar_id = calendar.id,
                %start_date,
                "cleanup calendar created"
            );
            created += 1;
        }
        Ok(created)
    }

    /// One reconciliation pass over every active calendar: settle
    /// terminal outcomes (failures, timeouts, completion), then create
    /// the next task just-in-time where its turn and date have arrived.
    /// Returns the number of tasks created.
    pub fn tick(store: &dyn ICleanupStore, now: DateTime<Utc>) -> SweepResult<usize> {
        let mut created = 0;
        for calendar in store.list_active_calendars()? {
            if Self::reconcile_calendar(store, &calendar, now)? {
                created += Self::create_next_task(store, &calendar, now)?;
            }
        }
        Ok(created)
    }

    /// Settle the calendar's terminal outcomes. Returns true when the
    /// calendar is still active afterwards.
    fn reconcile_calendar(
        store: &dyn ICleanupStore,
        calendar: &CleanupCalendar,
        now: DateTime<Utc>,
    ) -> SweepResult<bool> {
        let tasks = store.tasks_for_calendar(calendar.id)?;

        if let Some(failed) = tasks.iter().find(|t| t.status == TaskStatus::Failed) {
            warn!(
                calendar_id = calendar.id,
                task_id = failed.id,
                action_type = %failed.action_type,
                "task failed, failing calendar"
            );
            store.update_calendar_status(calendar.id, CalendarStatus::Failed)?;
            return Ok(false);
        }

        let mut timed_out = false;
        for task in tasks.iter().filter(|t| t.is_expired(now)) {
            warn!(
                calendar_id = calendar.id,
                task_id = task.id,
                action_type = %task.action_type,
                max_execution_hours = task.max_execution_hours,
                "reserved task timed out"
            );
            store.update_task_status(
                task.id,
                TaskStatus::Failed,
                Some(format!(
                    "task exceeded maximum execution time of {} hours",
                    task.max_execution_hours
                )),
                Some(now),
            )?;
            timed_out = true;
        }
        if timed_out {
            store.update_calendar_status(calendar.id, CalendarStatus::Failed)?;
            return Ok(false);
        }

        let config = store.get_configuration(calendar.rootfolder_id)?;
        let expected = round_template(config.cycle_time).len();
        let completed = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        if completed >= expected {
            info!(
                calendar_id = calendar.id,
                rootfolder_id = calendar.rootfolder_id,
                "all tasks completed, calendar completed"
            );
            store.update_calendar_status(calendar.id, CalendarStatus::Completed)?;
            return Ok(false);
        }

        Ok(true)
    }

    /// Create the next task for an active calendar if its predecessor
    /// is complete and its scheduled date has arrived. Tasks are created
    /// one at a time, directly in Activated status.
    fn create_next_task(
        store: &dyn ICleanupStore,
        calendar: &CleanupCalendar,
        now: DateTime<Utc>,
    ) -> SweepResult<usize> {
        let config = store.get_configuration(calendar.rootfolder_id)?;
        let template = round_template(config.cycle_time);
        let existing = store.tasks_for_calendar(calendar.id)?;

        let next_index = existing.len();
        if next_index >= template.len() {
            return Ok(0);
        }
        if let Some(last) = existing.last() {
            if last.status != TaskStatus::Completed {
                // Strict sequential execution: never two tasks at once.
                return Ok(0);
            }
        }

        let entry = &template[next_index];
        let scheduled_date = calendar.start_date + Duration::days(entry.task_offset);
        if now.date_naive() < scheduled_date {
            return Ok(0);
        }

        let storage_id = if entry.needs_storage {
            store.get_rootfolder(calendar.rootfolder_id)?.storage_id
        } else {
            None
        };

        let task = store.create_task(CleanupTask {
            id: 0,
            calendar_id: calendar.id,
            rootfolder_id: calendar.rootfolder_id,
            action_type: entry.action_type,
            storage_id,
            status: TaskStatus::Activated,
            scheduled_date,
            task_offset: entry.task_offset,
            max_execution_hours: entry.max_execution_hours,
            precondition_states: entry.precondition_states.clone(),
            target_state: entry.target_state,
            state_transition_on_reservation: entry.state_transition_on_reservation,
            state_verification_on_completion: entry.state_verification_on_completion,
            reserved_by_agent_id: None,
            reserved_at: None,
            completed_at: None,
            status_message: None,
        })?;
        info!(
            calendar_id = calendar.id,
            task_id = task.id,
            action_type = %task.action_type,
            %scheduled_date,
            "task activated"
        );
        Ok(1)
    }

    /// Interrupt every active calendar for the rootfolder and fail its
    /// outstanding tasks. Invoked when a user edits the configuration
    /// mid-round.
    pub fn deactivate_calendar(
        store: &dyn ICleanupStore,
        rootfolder_id: RootFolderId,
        now: DateTime<Utc>,
    ) -> SweepResult<usize> {
        let mut interrupted = 0;
        while let Some(calendar) = store.active_calendar(rootfolder_id)? {
            for task in store.tasks_for_calendar(calendar.id)? {
                if !task.status.is_terminal() {
                    store.update_task_status(
                        task.id,
                        TaskStatus::Failed,
                        Some("task cancelled because the cleanup round was interrupted".to_string()),
                        Some(now),
                    )?;
                }
            }
            store.update_calendar_status(calendar.id, CalendarStatus::Interrupted)?;
            info!(rootfolder_id, calendar_id = calendar.id, "calendar interrupted");
            interrupted += 1;
        }
        Ok(interrupted)
    }

    /// The user-edit path: persist new settings, reset progress to
    /// Inactive, and interrupt any round in flight.
    pub fn update_configuration(
        store: &dyn ICleanupStore,
        rootfolder_id: RootFolderId,
        cycle_time: i64,
        frequency: i64,
        start_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> SweepResult<CleanupConfiguration> {
        let mut config = store.get_configuration(rootfolder_id)?;
        config.cycle_time = cycle_time;
        config.frequency = frequency;
        config.start_date = start_date;
        config.progress = Progress::Inactive;
        store.update_configuration(&config)?;
        Self::deactivate_calendar(store, rootfolder_id, now)?;
        info!(rootfolder_id, cycle_time, frequency, "configuration updated, progress reset");
        Ok(config)
    }
}
