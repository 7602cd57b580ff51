use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::retention_type::ExternalRetentionCategory;

/// One folder record emitted by the external tree scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub folder_path: String,
    pub modified_date: Option<NaiveDate>,
    pub detected_as_simulation: bool,
    /// Category the scan asserts, if any. Endstage values override the
    /// stored retention; `Numeric` defers to the calculator.
    #[serde(default)]
    pub external_category: Option<ExternalRetentionCategory>,
}
