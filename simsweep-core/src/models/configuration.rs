use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::RootFolderId;
use super::progress::Progress;

/// Per-rootfolder cleanup settings plus the round's progress state.
///
/// Users own `cycle_time`, `frequency` and `start_date`; the scheduler
/// owns `progress`. Any user edit resets progress to Inactive and
/// interrupts the active calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupConfiguration {
    pub rootfolder_id: RootFolderId,
    /// Length of the retention-review window, in days. Also the horizon
    /// added to a folder's modified date when computing expiration.
    #[serde(default)]
    pub cycle_time: i64,
    /// Days between rounds.
    #[serde(default)]
    pub frequency: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "defaults::progress")]
    pub progress: Progress,
}

mod defaults {
    use super::Progress;

    pub fn progress() -> Progress {
        Progress::Inactive
    }
}

impl CleanupConfiguration {
    pub fn new(rootfolder_id: RootFolderId) -> Self {
        Self {
            rootfolder_id,
            cycle_time: 0,
            frequency: 0,
            start_date: None,
            progress: Progress::Inactive,
        }
    }

    /// Whether a new round may begin: idle progress, both durations set,
    /// and a start date that has arrived.
    pub fn is_ready_to_start(&self, today: NaiveDate) -> bool {
        matches!(self.progress, Progress::Inactive | Progress::Done)
            && self.cycle_time > 0
            && self.frequency > 0
            && self.start_date.is_some_and(|d| d <= today)
    }
}
