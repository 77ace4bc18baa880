//! Error types for confetti

use thiserror::Error;

/// The main error type for confetti operations
#[derive(Debug, Error)]
pub enum ConfettiError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfettiError {
    /// Shorthand used by the config validators
    pub fn invalid(msg: impl Into<String>) -> Self {
        ConfettiError::InvalidConfiguration(msg.into())
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, ConfettiError::InvalidConfiguration(_))
    }
}

/// Result type alias for confetti operations
pub type Result<T> = std::result::Result<T, ConfettiError>;

impl From<toml::de::Error> for ConfettiError {
    fn from(err: toml::de::Error) -> Self {
        ConfettiError::TomlParseError(err.to_string())
    }
}
