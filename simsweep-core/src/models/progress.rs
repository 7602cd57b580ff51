//! The cleanup-round progress state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SchedulerError;

/// Progress of one rootfolder through its cleanup round.
///
/// A linear cycle: `Inactive → Scanning → MarkingForReview →
/// RetentionReview → Cleaning → UnmarkingAfterReview → Done`, after
/// which the round either restarts (Scanning) or falls back to
/// Inactive. Every active state may also abort to Inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    Inactive,
    Scanning,
    MarkingForReview,
    RetentionReview,
    Cleaning,
    UnmarkingAfterReview,
    Done,
}

impl Progress {
    /// The states a round may legally move to from `self`.
    pub fn valid_transitions(self) -> &'static [Progress] {
        use Progress::*;
        match self {
            Inactive => &[Scanning],
            Scanning => &[MarkingForReview, Inactive],
            MarkingForReview => &[RetentionReview, Inactive],
            RetentionReview => &[Cleaning, Inactive],
            Cleaning => &[UnmarkingAfterReview, Inactive],
            UnmarkingAfterReview => &[Done, Inactive],
            Done => &[Scanning, Inactive],
        }
    }

    /// The forward edge of the cycle, ignoring aborts.
    pub fn next_natural_state(self) -> Progress {
        use Progress::*;
        match self {
            Inactive => Scanning,
            Scanning => MarkingForReview,
            MarkingForReview => RetentionReview,
            RetentionReview => Cleaning,
            Cleaning => UnmarkingAfterReview,
            UnmarkingAfterReview => Done,
            Done => Scanning,
        }
    }

    /// Whether moving to `to` is a legal transition.
    pub fn can_transition_to(self, to: Progress) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a requested transition, keeping the error surface in one place.
    pub fn transition_to(self, to: Progress) -> Result<Progress, SchedulerError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(SchedulerError::InvalidTransition {
                from: self.to_string(),
                to: to.to_string(),
            })
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Scanning => "scanning",
            Self::MarkingForReview => "marking_for_review",
            Self::RetentionReview => "retention_review",
            Self::Cleaning => "cleaning",
            Self::UnmarkingAfterReview => "unmarking_after_review",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Progress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inactive" => Ok(Self::Inactive),
            "scanning" => Ok(Self::Scanning),
            "marking_for_review" => Ok(Self::MarkingForReview),
            "retention_review" => Ok(Self::RetentionReview),
            "cleaning" => Ok(Self::Cleaning),
            "unmarking_after_review" => Ok(Self::UnmarkingAfterReview),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown progress state: {other}")),
        }
    }
}
