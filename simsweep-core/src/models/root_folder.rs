use serde::{Deserialize, Serialize};

use super::ids::RootFolderId;

/// One managed top-level filesystem tree subject to cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootFolder {
    pub id: RootFolderId,
    pub path: String,
    /// The storage backend this tree lives on. Copied onto tasks that
    /// need a storage-capable agent.
    pub storage_id: Option<String>,
}
