pub mod error;
pub mod event;
pub mod event_mapper;
pub mod json;
pub mod options;
pub mod reducer;
pub mod retry;
pub mod stream_collect;
pub mod transport;

pub use crate::core::error::{ReduceError, StreamError, TransportError};
pub use crate::core::event::StreamEvent;
pub use crate::core::event_mapper::{EventMapper, PAYLOAD_EVENT};
pub use crate::core::reducer::{JsonPatchReducer, StateReducer};
pub use crate::core::retry::RetryConfig;
pub use crate::core::stream_collect::{collect_final_state, CollectedState, StreamCollectorConfig};
pub use crate::core::transport::{
    ByteStream, HttpTransport, StreamRequest, StreamResponse, TransportBody, TransportConfig,
};

#[cfg(test)]
#[path = "../tests/retry_tests.rs"]
mod retry_tests;

#[cfg(test)]
#[path = "../tests/json_tests.rs"]
mod json_tests;

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod reducer_tests;

#[cfg(test)]
#[path = "../tests/event_mapper_tests.rs"]
mod event_mapper_tests;

#[cfg(test)]
#[path = "../tests/stream_collect_tests.rs"]
mod stream_collect_tests;
