// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- StoreError

/// Crate-wide error type.
///
/// Validation and precondition failures are fully local and never reach the
/// backend; server rejections carry the server's message verbatim plus an
/// optional machine-readable code.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Client-side field validation failed; shown inline, no network call made.
    #[error("{0}")]
    Validation(String),

    /// The backend rejected the request (4xx with a message body).
    #[error("{message}")]
    ServerRejection {
        message: String,
        code: Option<String>,
    },

    /// No usable response: connectivity failure or the blanket request timeout.
    #[error("network error: {0}")]
    Network(String),

    /// Locally known-invalid data; the step aborts before any network call.
    #[error("{0}")]
    Precondition(String),

    /// The browser-storage equivalent failed to read or write a blob.
    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Server rejection without a machine code.
    pub fn rejection(message: impl Into<String>) -> Self {
        StoreError::ServerRejection {
            message: message.into(),
            code: None,
        }
    }

    /// The message to put in front of the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True for the failures that never reach the backend.
    pub fn is_local(&self) -> bool {
        matches!(self, StoreError::Validation(_) | StoreError::Precondition(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

// endregion: --- StoreError
