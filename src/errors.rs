use std::result::Result as StdResult;

use bookkeeper_config::ConfigError;
use bookkeeper_core::CoreError;
use thiserror::Error;

/// Unified error type for the facade and the CLI.
#[derive(Error, Debug)]
pub enum BookkeeperError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = StdResult<T, BookkeeperError>;
