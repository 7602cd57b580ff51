use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{FolderId, PathProtectionId, RetentionId, RootFolderId};
use super::retention_decision::RetentionDecision;

/// A managed simulation-result folder within a rootfolder tree.
///
/// Retention fields are mutated exclusively by applying a
/// [`RetentionDecision`]; the folder row itself is never deleted by the
/// core (deletion is the cleanup agent's concern).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub rootfolder_id: RootFolderId,
    pub path: String,
    pub retention_id: Option<RetentionId>,
    pub expiration_date: Option<NaiveDate>,
    pub modified_date: Option<NaiveDate>,
    pub path_protection_id: Option<PathProtectionId>,
}

impl Folder {
    /// The folder's current retention state as a decision value.
    pub fn current_decision(&self) -> Option<RetentionDecision> {
        self.retention_id.map(|retention_id| RetentionDecision {
            retention_id,
            path_protection_id: self.path_protection_id,
            expiration_date: self.expiration_date,
        })
    }

    /// Copy a decision onto this record.
    pub fn apply_decision(&mut self, decision: RetentionDecision) {
        self.retention_id = Some(decision.retention_id);
        self.path_protection_id = decision.path_protection_id;
        self.expiration_date = decision.expiration_date;
    }
}
