use thiserror::Error;

/// Errors surfaced by the client library.
///
/// `Http` displays only the message extracted from the API so it can be shown
/// to the user verbatim.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Context(String),
}

impl AppError {
    /// HTTP status for API failures, `None` for everything else.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
