/// Retention calculation and catalog errors.
///
/// These are consistency failures: they indicate a misconfigured catalog
/// or a folder record that violates an invariant, and must surface to the
/// caller rather than being defaulted away.
#[derive(Debug, thiserror::Error)]
pub enum RetentionError {
    #[error("retention catalog invalid: {reason}")]
    InvalidCatalog { reason: String },

    #[error("retention inconsistency for folder '{path}': {reason}")]
    Inconsistency { path: String, reason: String },

    #[error("unknown retention id {retention_id}")]
    UnknownRetention { retention_id: i64 },

    #[error("unknown external retention category '{category}'")]
    UnknownExternalCategory { category: String },
}
