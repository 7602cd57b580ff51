use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{PathProtectionId, RetentionId};

/// The immutable outcome of one retention calculation.
///
/// Produced by the calculator, applied to a folder record in a separate
/// step. Never conflated with the persisted folder row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionDecision {
    pub retention_id: RetentionId,
    pub path_protection_id: Option<PathProtectionId>,
    pub expiration_date: Option<NaiveDate>,
}

impl RetentionDecision {
    /// A decision with no protection and no expiration.
    pub fn bare(retention_id: RetentionId) -> Self {
        Self {
            retention_id,
            path_protection_id: None,
            expiration_date: None,
        }
    }
}
