//! Retrying event stream subscriptions.
//!
//! - driver.rs: connect / stream / retry state machine
//! - options.rs: per-subscription request and retry settings

pub mod driver;
pub mod options;

pub use driver::{stream_events, EventStream};
pub use options::StreamOptions;

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
