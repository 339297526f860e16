//! bookkeeper-config
//!
//! Persistent configuration: where the data files live and how reports behave.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
