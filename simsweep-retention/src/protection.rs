//! Longest-prefix matching of folder paths against protected subtrees.

use simsweep_core::models::PathProtection;

/// Normalize a path for matching: forward slashes, lower-case, no
/// trailing slash.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .to_lowercase()
        .trim_end_matches('/')
        .to_string()
}

/// An immutable index over one rootfolder's path protections.
///
/// Entries are ordered by descending path-segment count so the most
/// specific protection wins; matching requires either path equality or a
/// '/' boundary after the prefix, so a protection on `r1` never matches
/// `r10/x`.
#[derive(Debug, Clone, Default)]
pub struct PathProtectionIndex {
    entries: Vec<(String, PathProtection)>,
}

impl PathProtectionIndex {
    pub fn new(protections: Vec<PathProtection>) -> Self {
        let mut entries: Vec<(String, PathProtection)> = protections
            .into_iter()
            .map(|p| (normalize_path(&p.path), p))
            .collect();
        entries.sort_by(|a, b| {
            let segments = |s: &str| s.matches('/').count();
            segments(&b.0).cmp(&segments(&a.0))
        });
        Self { entries }
    }

    /// The most specific protection covering `path`, if any.
    /// First match wins; the ordering makes that the longest one.
    pub fn match_path(&self, path: &str) -> Option<&PathProtection> {
        let path = normalize_path(path);
        self.entries
            .iter()
            .find(|(prefix, _)| path == *prefix || path.starts_with(&format!("{prefix}/")))
            .map(|(_, protection)| protection)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
