use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    /// Bad user or import input. The operation is aborted with no state change.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Imported data is not the expected JSON shape.
    #[error("Format error: {0}")]
    Format(String),

    /// Transport failure or non-success status from the remote collection.
    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl QuoteError {
    /// Network failures are recoverable: the session keeps working offline.
    pub fn is_network(&self) -> bool {
        matches!(self, QuoteError::Network(_))
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        QuoteError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
