#[path = "../crates/core/src/lib.rs"]
pub mod core;
#[path = "../crates/streaming-sse/src/lib.rs"]
pub mod streaming_sse;
#[path = "../crates/transports/reqwest/src/lib.rs"]
pub mod transport_reqwest;
#[path = "../crates/client/src/lib.rs"]
pub mod client;

pub mod transports {
    pub use crate::transport_reqwest as reqwest;
}

pub use crate::client::{stream_events, EventStream, StreamOptions};
pub use crate::core::{StreamError, StreamEvent, TransportError};
