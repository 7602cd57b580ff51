use serde::{Deserialize, Serialize};

use super::task::ActionType;

/// Identity an external worker presents at reservation time.
/// Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub agent_id: String,
    /// Action types this agent can execute. Must be non-empty.
    pub action_types: Vec<ActionType>,
    /// Storage backends this agent can reach. Empty means the agent has
    /// no storage capability and may only take storage-less tasks.
    #[serde(default)]
    pub supported_storage_ids: Vec<String>,
}

impl AgentInfo {
    /// Whether this agent may execute a task bound to `storage_id`.
    pub fn supports_storage(&self, storage_id: Option<&str>) -> bool {
        match storage_id {
            Some(id) => self.supported_storage_ids.iter().any(|s| s == id),
            None => self.supported_storage_ids.is_empty(),
        }
    }
}
