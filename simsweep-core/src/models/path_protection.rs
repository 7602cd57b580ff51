use serde::{Deserialize, Serialize};

use super::ids::{FolderId, PathProtectionId, RootFolderId};

/// A user-declared subtree exempt from automatic retention changes:
/// nothing under `path` is ever auto-expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathProtection {
    pub id: PathProtectionId,
    pub rootfolder_id: RootFolderId,
    pub folder_id: FolderId,
    pub path: String,
}
