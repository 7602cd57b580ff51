/// Simsweep system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reserved retention name for the undefined sentinel ("no decision yet").
pub const RETENTION_NAME_UNDEFINED: &str = "?";

/// Reserved retention name for the path-protection category.
pub const RETENTION_NAME_PATH: &str = "path";

/// Reserved retention name for the marked-for-cleanup category.
pub const RETENTION_NAME_MARKED: &str = "marked";

/// Maximum execution window for long-running storage tasks (scan, clean).
pub const LONG_TASK_MAX_HOURS: i64 = 48;

/// Maximum execution window for short internal tasks.
pub const SHORT_TASK_MAX_HOURS: i64 = 1;
