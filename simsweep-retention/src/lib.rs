//! # simsweep-retention
//!
//! The retention side of the cleanup engine: the per-rootfolder retention
//! catalog, the path protection matcher, the deterministic retention
//! calculator, and the store-driven bulk passes that apply it.

pub mod calculator;
pub mod catalog;
pub mod passes;
pub mod protection;

pub use calculator::{CurrentRetention, RetentionCalculator};
pub use catalog::RetentionCatalog;
pub use passes::{apply_scan_results, run_mark_pass, run_unmark_pass};
pub use protection::PathProtectionIndex;
