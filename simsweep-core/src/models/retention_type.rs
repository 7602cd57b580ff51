use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RetentionId;
use crate::errors::RetentionError;

/// One retention category in a rootfolder's catalog.
///
/// Numeric categories carry a `days_to_cleanup` threshold; endstage
/// categories (clean/issue/missing) are terminal; the reserved "path"
/// category is neither, and the reserved "marked" category is numeric
/// with threshold 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionType {
    pub id: RetentionId,
    pub name: String,
    pub days_to_cleanup: Option<i64>,
    pub is_endstage: bool,
    pub display_rank: i32,
}

impl RetentionType {
    /// Whether this category carries a day-count threshold.
    pub fn is_numeric(&self) -> bool {
        self.days_to_cleanup.is_some()
    }
}

/// Externally visible retention category, as reported by a scan.
///
/// `Numeric` maps to the undefined sentinel so the calculator performs
/// the real bucket assignment; the endstage variants map 1:1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalRetentionCategory {
    Numeric,
    Clean,
    Issue,
    Missing,
}

impl ExternalRetentionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Clean => "clean",
            Self::Issue => "issue",
            Self::Missing => "missing",
        }
    }

    /// Whether this category is terminal (assigned by the scan itself).
    pub fn is_endstage(self) -> bool {
        !matches!(self, Self::Numeric)
    }
}

impl fmt::Display for ExternalRetentionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExternalRetentionCategory {
    type Err = RetentionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(Self::Numeric),
            "clean" => Ok(Self::Clean),
            "issue" => Ok(Self::Issue),
            "missing" => Ok(Self::Missing),
            other => Err(RetentionError::UnknownExternalCategory {
                category: other.to_string(),
            }),
        }
    }
}
