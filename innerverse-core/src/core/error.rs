//! Error types for the Innerverse core library.

use thiserror::Error;

/// All errors that can occur within the Innerverse core library.
///
/// Business-rule misses (unknown ids, dangling category references) are not
/// errors; only storage, codec and draft-validation failures are represented.
#[derive(Debug, Error)]
pub enum JournalError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted snapshot could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The opened storage file is not a valid Innerverse store.
    #[error("Invalid storage: {0}")]
    InvalidStorage(String),

    /// A draft failed the checks the presentation layer runs before saving.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Convenience alias that pins the error type to [`JournalError`].
pub type Result<T> = std::result::Result<T, JournalError>;

impl JournalError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::InvalidStorage(_) => "Could not open journal storage".to_string(),
            Self::ValidationFailed(msg) => msg.clone(),
        }
    }
}
