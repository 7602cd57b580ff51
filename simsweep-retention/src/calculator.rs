//! The retention calculator.
//!
//! Pure with respect to the store: it computes over a catalog and
//! protection snapshot plus explicit inputs, and returns an immutable
//! [`RetentionDecision`] the caller applies under its own transaction
//! discipline. Subtle ordering and precedence here decides which data
//! survives a cleanup round, so every rule is explicit.

use chrono::{Duration, NaiveDate};

use simsweep_core::errors::RetentionError;
use simsweep_core::models::{
    Folder, PathProtectionId, RetentionDecision, RetentionId, ScanResult,
};

use crate::catalog::RetentionCatalog;
use crate::protection::PathProtectionIndex;

/// A folder's persisted retention state, as input to the calculator.
/// `retention_id = None` means no decision has been made yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentRetention {
    pub retention_id: Option<RetentionId>,
    pub path_protection_id: Option<PathProtectionId>,
    pub expiration_date: Option<NaiveDate>,
}

impl From<&Folder> for CurrentRetention {
    fn from(folder: &Folder) -> Self {
        Self {
            retention_id: folder.retention_id,
            path_protection_id: folder.path_protection_id,
            expiration_date: folder.expiration_date,
        }
    }
}

/// Calculator for one rootfolder, scoped to one round.
///
/// `recompute_all` selects the phase: right after a round starts every
/// numeric retention is re-bucketed; mid-round a user's explicit choice
/// is never silently overwritten.
pub struct RetentionCalculator<'a> {
    catalog: &'a RetentionCatalog,
    protections: &'a PathProtectionIndex,
    round_start_date: NaiveDate,
    cycle_time: i64,
    recompute_all: bool,
}

impl<'a> RetentionCalculator<'a> {
    pub fn new(
        catalog: &'a RetentionCatalog,
        protections: &'a PathProtectionIndex,
        round_start_date: NaiveDate,
        cycle_time: i64,
        recompute_all: bool,
    ) -> Self {
        Self {
            catalog,
            protections,
            round_start_date,
            cycle_time,
            recompute_all,
        }
    }

    /// The protection covering `path`, expressed as a decision.
    pub fn match_path(&self, path: &str) -> Option<RetentionDecision> {
        self.protections.match_path(path).map(|p| RetentionDecision {
            retention_id: self.catalog.path_id(),
            path_protection_id: Some(p.id),
            expiration_date: None,
        })
    }

    /// A human picked a category directly: non-numeric clears the
    /// expiration, numeric anchors it to the round start.
    pub fn adjust_for_manual_selection(
        &self,
        retention_id: RetentionId,
    ) -> Result<RetentionDecision, RetentionError> {
        if self.catalog.get(retention_id).is_none() {
            return Err(RetentionError::UnknownRetention { retention_id });
        }
        let expiration_date = self
            .catalog
            .numeric_thresholds()
            .iter()
            .find(|&&(id, _)| id == retention_id)
            .map(|&(_, days)| self.round_start_date + Duration::days(days));
        Ok(RetentionDecision {
            retention_id,
            path_protection_id: None,
            expiration_date,
        })
    }

    /// The scan-driven adjustment.
    ///
    /// A content change invalidates any prior automatic decision (reset
    /// to undefined) but never overrides a path protection. Expiration is
    /// monotonic: `max(existing, modified + cycle_time)`, so a later scan
    /// can only push the deadline out, never pull it in.
    pub fn adjust_from_scan(
        &self,
        folder_path: &str,
        current: CurrentRetention,
        modified_date: Option<NaiveDate>,
        new_modified_date: Option<NaiveDate>,
    ) -> Result<RetentionDecision, RetentionError> {
        let undefined = self.catalog.undefined_id();
        let mut retention_id = current.retention_id;
        let mut expiration = current.expiration_date;
        let mut modified = modified_date;

        if modified.is_none() {
            // A folder never scanned before.
            modified = new_modified_date;
            if retention_id.is_none() {
                retention_id = Some(undefined);
            }
        } else if new_modified_date.is_some() && new_modified_date != modified {
            modified = new_modified_date;
            if retention_id != Some(self.catalog.path_id()) {
                retention_id = Some(undefined);
            }
        }

        if let Some(id) = retention_id {
            if !self.catalog.is_numeric(id) && id != undefined {
                // Endstage or path protected: terminal, no expiration.
                return Ok(RetentionDecision {
                    retention_id: id,
                    path_protection_id: current.path_protection_id,
                    expiration_date: None,
                });
            }
        }

        if let Some(m) = modified {
            let baseline = m + Duration::days(self.cycle_time);
            expiration = Some(expiration.map_or(baseline, |e| e.max(baseline)));
        }
        let expiration = expiration.ok_or_else(|| RetentionError::Inconsistency {
            path: folder_path.to_string(),
            reason: "numeric retention has no computable expiration date".to_string(),
        })?;

        let days_to_expiration = (expiration - self.round_start_date).num_days();
        let bucket = self.catalog.bucket_for(days_to_expiration);
        let marked = self.catalog.marked_id();

        let final_id = if self.recompute_all {
            bucket
        } else if retention_id.is_none()
            || retention_id == Some(undefined)
            || retention_id == Some(marked)
        {
            if bucket == marked && retention_id != Some(marked) {
                // Re-marking work already past due within the same round
                // is not allowed: postpone to the first non-marked bucket.
                self.catalog.retention_id_after_marked()
            } else {
                bucket
            }
        } else {
            // Mid-round, a user's explicit numeric choice stands.
            retention_id.unwrap_or(undefined)
        };

        Ok(RetentionDecision {
            retention_id: final_id,
            path_protection_id: current.path_protection_id,
            expiration_date: Some(expiration),
        })
    }

    /// Merge one scanned folder record into persisted state.
    ///
    /// Precedence, highest first: path protection, a scanned endstage
    /// category, reset of a stored endstage the scan no longer asserts,
    /// then the stored retention adjusted for the scanned modified date.
    ///
    /// Returns the decision plus the modified date to persist with it.
    pub fn calculate_from_scan_result(
        &self,
        current: CurrentRetention,
        db_modified_date: Option<NaiveDate>,
        scan: &ScanResult,
    ) -> Result<(RetentionDecision, Option<NaiveDate>), RetentionError> {
        let scanned_id = match scan.external_category {
            Some(category) => Some(self.catalog.resolve_external(category)?),
            None => None,
        };

        let working = if let Some(protection) = self.protections.match_path(&scan.folder_path) {
            CurrentRetention {
                retention_id: Some(self.catalog.path_id()),
                path_protection_id: Some(protection.id),
                expiration_date: None,
            }
        } else if let Some(id) = scanned_id.filter(|&id| self.catalog.is_endstage(id)) {
            CurrentRetention {
                retention_id: Some(id),
                path_protection_id: None,
                expiration_date: None,
            }
        } else if current
            .retention_id
            .is_some_and(|id| self.catalog.is_endstage(id))
        {
            // The stored endstage is no longer asserted by the scan:
            // clear it so the numeric path below recomputes.
            CurrentRetention {
                retention_id: None,
                path_protection_id: None,
                expiration_date: None,
            }
        } else {
            current
        };

        if db_modified_date != scan.modified_date {
            let decision = self.adjust_from_scan(
                &scan.folder_path,
                working,
                db_modified_date,
                scan.modified_date,
            )?;
            Ok((decision, scan.modified_date))
        } else {
            let decision =
                self.adjust_from_scan(&scan.folder_path, working, db_modified_date, None)?;
            Ok((decision, db_modified_date))
        }
    }
}
