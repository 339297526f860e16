//! bookkeeper-core
//!
//! Invoice arithmetic and the report engine for bookkeeper.
//! Depends on bookkeeper-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod date_range;
pub mod error;
pub mod invoice_service;
pub mod options;
pub mod quality;
pub mod ranking;
pub mod report_service;
pub mod storage;
pub mod time;

pub use date_range::*;
pub use error::{CoreError, CoreResult};
pub use invoice_service::*;
pub use options::*;
pub use quality::*;
pub use ranking::*;
pub use report_service::*;
pub use storage::*;
pub use time::*;

#[cfg(test)]
mod tests;
