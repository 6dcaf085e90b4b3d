//! Error types for formkit-core

use thiserror::Error;

use crate::domain::IdentifierError;

/// Core error type for formkit operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration values are invalid
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Input could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Filesystem errors
    #[error("IO error: {0}")]
    Io(String),

    /// A configured identifier prefix failed validation
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),
}

impl Error {
    /// Create an invalid-config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an IO error.
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

/// Result type alias for formkit-core operations
pub type Result<T> = std::result::Result<T, Error>;
