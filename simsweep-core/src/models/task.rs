use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CalendarId, RootFolderId, TaskId};
use super::progress::Progress;

/// The seven kinds of work that make up one cleanup round, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Scan,
    MarkForReview,
    SendInitialNotification,
    SendFinalNotification,
    Clean,
    UnmarkAfterReview,
    Finalise,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::MarkForReview => "mark_for_review",
            Self::SendInitialNotification => "send_initial_notification",
            Self::SendFinalNotification => "send_final_notification",
            Self::Clean => "clean",
            Self::UnmarkAfterReview => "unmark_after_review",
            Self::Finalise => "finalise",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scan" => Ok(Self::Scan),
            "mark_for_review" => Ok(Self::MarkForReview),
            "send_initial_notification" => Ok(Self::SendInitialNotification),
            "send_final_notification" => Ok(Self::SendFinalNotification),
            "clean" => Ok(Self::Clean),
            "unmark_after_review" => Ok(Self::UnmarkAfterReview),
            "finalise" => Ok(Self::Finalise),
            other => Err(format!("unknown action type: {other}")),
        }
    }
}

/// Task lifecycle. Created directly as Activated (creation is itself
/// just-in-time); Completed and Failed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Activated,
    Reserved,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activated => "activated",
            Self::Reserved => "reserved",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activated" => Ok(Self::Activated),
            "reserved" => Ok(Self::Reserved),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// One unit of work within a round, claimed by exactly one agent.
///
/// The reservation is a lease, not a lock: if the agent never reports
/// back, the scheduler's timeout check fails the task on the next tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupTask {
    pub id: TaskId,
    pub calendar_id: CalendarId,
    pub rootfolder_id: RootFolderId,
    pub action_type: ActionType,
    /// Set only when the work requires a storage-capable agent.
    pub storage_id: Option<String>,
    pub status: TaskStatus,
    pub scheduled_date: NaiveDate,
    pub task_offset: i64,
    pub max_execution_hours: i64,
    /// Progress states the configuration must be in for reservation to
    /// succeed. Empty means unconditional.
    pub precondition_states: Vec<Progress>,
    pub target_state: Option<Progress>,
    pub state_transition_on_reservation: bool,
    pub state_verification_on_completion: bool,
    pub reserved_by_agent_id: Option<String>,
    pub reserved_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status_message: Option<String>,
}

impl CleanupTask {
    /// Whether a reserved task has exceeded its execution window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Reserved
            && self
                .reserved_at
                .is_some_and(|at| now - at > chrono::Duration::hours(self.max_execution_hours))
    }
}
