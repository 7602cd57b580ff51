//! Validated view over one rootfolder's set of retention categories.

use simsweep_core::constants::{
    RETENTION_NAME_MARKED, RETENTION_NAME_PATH, RETENTION_NAME_UNDEFINED,
};
use simsweep_core::errors::RetentionError;
use simsweep_core::models::{ExternalRetentionCategory, RetentionId, RetentionType};

/// One rootfolder's retention catalog, with the invariants checked once
/// at construction so the calculator can rely on them:
///
/// - the numeric subset is non-empty and held sorted ascending by
///   `days_to_cleanup`;
/// - the reserved "marked" category is numeric with threshold 0 and is
///   therefore first in the ascending ordering;
/// - exactly one reserved "path" category and one "?" undefined sentinel
///   exist, both non-numeric and non-endstage.
#[derive(Debug, Clone)]
pub struct RetentionCatalog {
    types: Vec<RetentionType>,
    /// (id, days_to_cleanup), ascending by threshold.
    numeric: Vec<(RetentionId, i64)>,
    undefined_id: RetentionId,
    path_id: RetentionId,
    marked_id: RetentionId,
}

impl RetentionCatalog {
    pub fn new(types: Vec<RetentionType>) -> Result<Self, RetentionError> {
        let mut numeric: Vec<(RetentionId, i64)> = types
            .iter()
            .filter_map(|t| t.days_to_cleanup.map(|d| (t.id, d)))
            .collect();
        numeric.sort_by_key(|&(_, days)| days);

        if numeric.len() < 2 {
            return Err(RetentionError::InvalidCatalog {
                reason: format!(
                    "need at least two numeric retention types, found {}",
                    numeric.len()
                ),
            });
        }

        let undefined_id = Self::find_reserved(&types, RETENTION_NAME_UNDEFINED)?;
        let path_id = Self::find_reserved(&types, RETENTION_NAME_PATH)?;
        let marked_id = Self::find_reserved(&types, RETENTION_NAME_MARKED)?;

        if numeric[0] != (marked_id, 0) {
            return Err(RetentionError::InvalidCatalog {
                reason: "the 'marked' type must be numeric with days_to_cleanup = 0 \
                         and first in the ascending ordering"
                    .to_string(),
            });
        }
        for reserved in [undefined_id, path_id] {
            let entry = types.iter().find(|t| t.id == reserved);
            if entry.is_some_and(|t| t.is_numeric() || t.is_endstage) {
                return Err(RetentionError::InvalidCatalog {
                    reason: "the 'path' and '?' types must be non-numeric and non-endstage"
                        .to_string(),
                });
            }
        }

        Ok(Self {
            types,
            numeric,
            undefined_id,
            path_id,
            marked_id,
        })
    }

    fn find_reserved(types: &[RetentionType], name: &str) -> Result<RetentionId, RetentionError> {
        let mut matches = types.iter().filter(|t| t.name == name);
        match (matches.next(), matches.next()) {
            (Some(t), None) => Ok(t.id),
            (None, _) => Err(RetentionError::InvalidCatalog {
                reason: format!("missing reserved retention type '{name}'"),
            }),
            (Some(_), Some(_)) => Err(RetentionError::InvalidCatalog {
                reason: format!("duplicate reserved retention type '{name}'"),
            }),
        }
    }

    pub fn get(&self, id: RetentionId) -> Option<&RetentionType> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn is_numeric(&self, id: RetentionId) -> bool {
        self.numeric.iter().any(|&(n, _)| n == id)
    }

    pub fn is_endstage(&self, id: RetentionId) -> bool {
        self.get(id).is_some_and(|t| t.is_endstage)
    }

    /// `(id, days_to_cleanup)` pairs, ascending by threshold.
    pub fn numeric_thresholds(&self) -> &[(RetentionId, i64)] {
        &self.numeric
    }

    pub fn undefined_id(&self) -> RetentionId {
        self.undefined_id
    }

    pub fn path_id(&self) -> RetentionId {
        self.path_id
    }

    pub fn marked_id(&self) -> RetentionId {
        self.marked_id
    }

    /// The first non-marked numeric bucket. Index 1 is correct because
    /// "marked" is guaranteed to sit at index 0.
    pub fn retention_id_after_marked(&self) -> RetentionId {
        self.numeric[1].0
    }

    /// The numeric bucket for a day count: the lowest-threshold entry
    /// with `days_to_cleanup >= days_to_expiration`, clamped to the last
    /// bucket when the count exceeds every threshold.
    pub fn bucket_for(&self, days_to_expiration: i64) -> RetentionId {
        let idx = self
            .numeric
            .partition_point(|&(_, days)| days < days_to_expiration);
        self.numeric[idx.min(self.numeric.len() - 1)].0
    }

    /// Map an externally visible category to an internal id. `Numeric`
    /// maps to the undefined sentinel so the calculator performs the
    /// real bucket assignment; endstage categories map 1:1 by name.
    pub fn resolve_external(
        &self,
        category: ExternalRetentionCategory,
    ) -> Result<RetentionId, RetentionError> {
        if category == ExternalRetentionCategory::Numeric {
            return Ok(self.undefined_id);
        }
        self.types
            .iter()
            .find(|t| t.name == category.as_str() && t.is_endstage)
            .map(|t| t.id)
            .ok_or_else(|| RetentionError::UnknownExternalCategory {
                category: category.to_string(),
            })
    }
}
