#![doc(test(attr(deny(warnings))))]

//! Bookkeeper ties invoice storage, configuration and the report engine together
//! behind a single facade and a small command-line front end.

pub mod cli;
pub mod errors;
pub mod manager;
pub mod system_clock;
pub mod utils;

use std::sync::Once;

pub use errors::{BookkeeperError, Result};
pub use manager::Bookkeeper;
pub use system_clock::SystemClock;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("bookkeeper tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
