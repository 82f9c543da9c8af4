//! Status and confirmation message types for operation feedback.

use std::fmt;

/// Severity of an [`OperationStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Notice,
}

/// One-line feedback for operations that have no richer result to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub message: String,
    pub kind: StatusKind,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    /// Not an error, but nothing changed, e.g. a locked week.
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Notice,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            StatusKind::Success => "Success:",
            StatusKind::Notice => "Note:",
        };
        writeln!(f, "{prefix} {}", self.message)
    }
}
