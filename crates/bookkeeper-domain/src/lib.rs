//! bookkeeper-domain
//!
//! Pure domain models (Invoice, Customer, report documents).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod customer;
pub mod invoice;
pub mod report;

pub use customer::*;
pub use invoice::*;
pub use report::*;
