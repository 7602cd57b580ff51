//! The pull/lease protocol by which agents claim and complete tasks.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use simsweep_core::errors::{SchedulerError, SweepResult};
use simsweep_core::models::{AgentInfo, CleanupTask, TaskId, TaskStatus};
use simsweep_core::traits::ICleanupStore;

/// Reserve/complete interface for external and internal agents alike.
pub struct AgentTaskManager;

impl AgentTaskManager {
    /// Claim one matching Activated task for the agent, or return None
    /// when nothing matches (agents poll, they never block).
    ///
    /// Matching: the task's action type must be one the agent declares,
    /// and its storage binding must fit the agent's capability (agents
    /// without storage ids only take storage-less tasks). The claim
    /// itself is the store's atomic compare-and-swap; losing the race
    /// simply moves on to the next candidate.
    pub fn reserve(
        store: &dyn ICleanupStore,
        agent: &AgentInfo,
        now: DateTime<Utc>,
    ) -> SweepResult<Option<CleanupTask>> {
        if agent.action_types.is_empty() {
            return Err(SchedulerError::InvalidAgent {
                agent_id: agent.agent_id.clone(),
            }
            .into());
        }

        for task in store.list_activated_tasks()? {
            if !agent.action_types.contains(&task.action_type) {
                continue;
            }
            if !agent.supports_storage(task.storage_id.as_deref()) {
                continue;
            }

            let config = store.get_configuration(task.rootfolder_id)?;
            if !task.precondition_states.is_empty()
                && !task.precondition_states.contains(&config.progress)
            {
                // The round is not in a state this task may run in; the
                // task stays Activated for a later attempt.
                return Err(SchedulerError::PreconditionFailed {
                    task_id: task.id,
                    progress: config.progress.to_string(),
                }
                .into());
            }
            if task.state_transition_on_reservation {
                if let Some(target) = task.target_state {
                    // Validate before claiming so a bad transition never
                    // leaves a claimed task behind.
                    config.progress.transition_to(target)?;
                }
            }

            if !store.try_reserve_task(task.id, &agent.agent_id, now)? {
                continue;
            }
            if task.state_transition_on_reservation {
                if let Some(target) = task.target_state {
                    store.update_configuration_progress(task.rootfolder_id, target)?;
                    info!(
                        rootfolder_id = task.rootfolder_id,
                        from = %config.progress,
                        to = %target,
                        "progress transitioned on reservation"
                    );
                }
            }
            let reserved = store.get_task(task.id)?;
            info!(
                task_id = reserved.id,
                action_type = %reserved.action_type,
                agent_id = %agent.agent_id,
                "task reserved"
            );
            return Ok(Some(reserved));
        }
        Ok(None)
    }

    /// Report a terminal outcome for a reserved task.
    ///
    /// Only Completed and Failed are accepted; the task must currently
    /// be Reserved (a late report from a timed-out agent is rejected).
    /// When the task verifies state on completion, the configuration
    /// must still sit in the task's target state.
    pub fn complete(
        store: &dyn ICleanupStore,
        task_id: TaskId,
        status: TaskStatus,
        message: Option<String>,
        now: DateTime<Utc>,
    ) -> SweepResult<()> {
        if !status.is_terminal() {
            return Err(SchedulerError::InvalidStatus {
                status: status.to_string(),
            }
            .into());
        }
        let task = store.get_task(task_id).map_err(|_| SchedulerError::TaskNotFound { task_id })?;
        if task.status != TaskStatus::Reserved {
            return Err(SchedulerError::TaskNotReserved {
                task_id,
                status: task.status.to_string(),
            }
            .into());
        }

        if status == TaskStatus::Completed && task.state_verification_on_completion {
            if let Some(target) = task.target_state {
                let config = store.get_configuration(task.rootfolder_id)?;
                if config.progress != target {
                    return Err(SchedulerError::StateVerificationFailed {
                        task_id,
                        expected: target.to_string(),
                        found: config.progress.to_string(),
                    }
                    .into());
                }
            }
        }

        store.update_task_status(task_id, status, message, Some(now))?;
        if status == TaskStatus::Failed {
            warn!(task_id, action_type = %task.action_type, "task reported failed");
        } else {
            info!(task_id, action_type = %task.action_type, "task completed");
        }
        Ok(())
    }
}
