//! Built-in agents for the storage-less tasks.
//!
//! These run in-process but go through the same reservation protocol as
//! external agents, so the lease and state-transition rules apply to
//! them unchanged. Notification tasks are left to an external agent.

use chrono::{DateTime, Utc};
use tracing::warn;

use simsweep_core::errors::SweepResult;
use simsweep_core::models::{ActionType, AgentInfo, CleanupTask, TaskStatus};
use simsweep_core::traits::ICleanupStore;
use simsweep_retention::{run_mark_pass, run_unmark_pass};

use crate::reservation::AgentTaskManager;

/// One in-process task executor. `agent_info` decides which tasks it
/// reserves; `execute` does the work and returns a status message.
pub trait IInternalAgent {
    fn agent_info(&self) -> AgentInfo;
    fn execute(&self, store: &dyn ICleanupStore, task: &CleanupTask) -> SweepResult<String>;
}

/// Recomputes every folder's retention at round start, which also marks
/// folders due for cleanup.
pub struct MarkForReviewAgent;

impl IInternalAgent for MarkForReviewAgent {
    fn agent_info(&self) -> AgentInfo {
        AgentInfo {
            agent_id: "internal-mark-for-review".to_string(),
            action_types: vec![ActionType::MarkForReview],
            supported_storage_ids: Vec::new(),
        }
    }

    fn execute(&self, store: &dyn ICleanupStore, task: &CleanupTask) -> SweepResult<String> {
        let config = store.get_configuration(task.rootfolder_id)?;
        let calendar = store.get_calendar(task.calendar_id)?;
        let updated = run_mark_pass(
            store,
            task.rootfolder_id,
            calendar.start_date,
            config.cycle_time,
        )?;
        Ok(format!(
            "recomputed retention of {updated} folders for rootfolder {}",
            task.rootfolder_id
        ))
    }
}

/// Postpones folders still marked after review and cleaning.
pub struct UnmarkAfterReviewAgent;

impl IInternalAgent for UnmarkAfterReviewAgent {
    fn agent_info(&self) -> AgentInfo {
        AgentInfo {
            agent_id: "internal-unmark-after-review".to_string(),
            action_types: vec![ActionType::UnmarkAfterReview],
            supported_storage_ids: Vec::new(),
        }
    }

    fn execute(&self, store: &dyn ICleanupStore, task: &CleanupTask) -> SweepResult<String> {
        let postponed = run_unmark_pass(store, task.rootfolder_id)?;
        Ok(format!(
            "postponed {postponed} marked folders for rootfolder {}",
            task.rootfolder_id
        ))
    }
}

/// Closes the round. The work is the state transition itself, which the
/// reservation protocol performs.
pub struct FinaliseAgent;

impl IInternalAgent for FinaliseAgent {
    fn agent_info(&self) -> AgentInfo {
        AgentInfo {
            agent_id: "internal-finalise".to_string(),
            action_types: vec![ActionType::Finalise],
            supported_storage_ids: Vec::new(),
        }
    }

    fn execute(&self, _store: &dyn ICleanupStore, task: &CleanupTask) -> SweepResult<String> {
        Ok(format!(
            "cleanup round finalised for rootfolder {}",
            task.rootfolder_id
        ))
    }
}

/// Drive each built-in agent through one reserve/execute/complete
/// attempt. An execution failure is reported as a Failed task, never
/// swallowed. Returns the number of tasks executed.
pub fn run_internal_agents(store: &dyn ICleanupStore, now: DateTime<Utc>) -> SweepResult<usize> {
    let agents: [&dyn IInternalAgent; 3] =
        [&MarkForReviewAgent, &UnmarkAfterReviewAgent, &FinaliseAgent];

    let mut executed = 0;
    for agent in agents {
        let info = agent.agent_info();
        let Some(task) = AgentTaskManager::reserve(store, &info, now)? else {
            continue;
        };
        match agent.execute(store, &task) {
            Ok(message) => {
                AgentTaskManager::complete(store, task.id, TaskStatus::Completed, Some(message), now)?;
            }
            Err(err) => {
                warn!(task_id = task.id, error = %err, "internal agent execution failed");
                AgentTaskManager::complete(
                    store,
                    task.id,
                    TaskStatus::Failed,
                    Some(err.to_string()),
                    now,
                )?;
            }
        }
        executed += 1;
    }
    Ok(executed)
}
