//! Error types for the momentum core library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all momentum operations.
#[derive(Error, Debug)]
pub enum MomentumError {
    /// SQLite connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Key-value store failures that are not tied to SQLite (blocking pool,
    /// injected failures, ...)
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A plan was requested before all four profile fields were filled in
    #[error("Profile is incomplete: missing {missing}")]
    ProfileIncomplete { missing: String },
    /// The generator answered, but not with a usable plan
    #[error("Invalid plan structure: {reason}")]
    InvalidPlan { reason: String },
    /// Transport or HTTP status failure talking to the plan generator
    #[error("Failed to fetch learning plan: {message}")]
    Generator { message: String },
    /// The plan generator did not answer in time
    #[error("Failed to fetch learning plan: no response after {seconds}s")]
    GeneratorTimeout { seconds: u64 },
    /// Another plan fetch is still outstanding
    #[error("A learning plan fetch is already in progress")]
    FetchInProgress,
    /// Week not found for the given ID
    #[error("Week with ID '{id}' not found")]
    WeekNotFound { id: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> MomentumError {
        MomentumError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MomentumError {
        MomentumError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl MomentumError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a storage error for `key`.
    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid plan error.
    pub fn invalid_plan(reason: impl Into<String>) -> Self {
        Self::InvalidPlan {
            reason: reason.into(),
        }
    }

    /// Wraps a tokio join failure from the blocking pool running a storage
    /// call for `key`.
    pub fn join(key: &str, err: tokio::task::JoinError) -> Self {
        Self::storage(key, format!("Task join error: {err}"))
    }

    /// Whether this error came from the remote generator round trip rather
    /// than local state.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Generator { .. } | Self::GeneratorTimeout { .. } | Self::InvalidPlan { .. }
        )
    }
}

/// Extension trait for Result to provide concise error mapping with
/// context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to MomentumError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

/// Specialized extension trait for HTTP client Results.
pub trait GeneratorResultExt<T> {
    /// Map transport errors with a message.
    fn generator_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| MomentumError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MomentumError::database(message).with_source(e))
    }
}

impl<T> GeneratorResultExt<T> for std::result::Result<T, reqwest::Error> {
    fn generator_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MomentumError::Generator {
            message: format!("{message}: {e}"),
        })
    }
}

/// Result type alias for momentum operations
pub type Result<T> = std::result::Result<T, MomentumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_classification() {
        assert!(MomentumError::GeneratorTimeout { seconds: 30 }.is_fetch_failure());
        assert!(MomentumError::invalid_plan("missing weeks").is_fetch_failure());
        assert!(!MomentumError::FetchInProgress.is_fetch_failure());
        assert!(!MomentumError::storage("weeks", "disk full").is_fetch_failure());
    }

    #[test]
    fn test_error_messages() {
        let err = MomentumError::invalid_input("hobbyName").with_reason("must not be blank");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'hobbyName': must not be blank"
        );

        let err = MomentumError::invalid_plan("weeks array is empty");
        assert_eq!(err.to_string(), "Invalid plan structure: weeks array is empty");
    }

    #[tokio::test]
    async fn test_join_failure_is_a_storage_error() {
        let join_err = tokio::spawn(async { panic!("worker crashed"); })
            .await
            .unwrap_err();

        let err = MomentumError::join("weeks", join_err);
        assert!(matches!(&err, MomentumError::Storage { key, .. } if key == "weeks"));
        assert!(err.to_string().starts_with("Storage error for key 'weeks'"));
    }
}
