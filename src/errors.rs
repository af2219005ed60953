use thiserror::Error;

/// Unified error type for the store, session, config, and service layers.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("No user signed in")]
    NotSignedIn,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}
