//! Error types for IR validation.

use std::fmt;
use thiserror::Error;

/// Result type alias for IR operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A single violated constraint inside an IR document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Location of the offending field, e.g. `elements[1].hint`.
    pub path: String,
    /// What is wrong with it.
    pub reason: String,
}

impl Violation {
    /// Create a violation at `path`.
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// The document failed validation.
///
/// Carries every violation found, in document order, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid IR document ({} violation(s)): {}", .violations.len(), summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Build an error from a non-empty list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    /// Error with a single violation.
    pub fn single(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(path, reason)],
        }
    }

    /// Whether any violation points at exactly `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
