use std::io;

use bookkeeper_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Config file is not valid: {0}")]
    Serde(String),

    /// The file parsed but holds settings the report engine refuses.
    #[error("Invalid report settings: {0}")]
    Invalid(String),
}

impl From<CoreError> for ConfigError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => ConfigError::Invalid(message),
            other => ConfigError::Invalid(other.to_string()),
        }
    }
}
