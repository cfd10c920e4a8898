use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::core::error::StreamError;
use crate::core::event::StreamEvent;
use crate::core::json::decode_patch_operations;
use crate::core::reducer::{JsonPatchReducer, StateReducer};
use crate::streaming_sse::SseMessage;

/// `event` name of messages whose `data` carries patch operations.
pub const PAYLOAD_EVENT: &str = "data";

/// Maps assembled SSE messages to high-level events, folding payloads into
/// the aggregated state it carries.
///
/// The state lives here rather than in the decoder so that it survives
/// reconnects: one mapper spans every attempt of a subscription.
pub struct EventMapper {
    reducer: Arc<dyn StateReducer>,
    state: Option<Value>,
}

impl EventMapper {
    pub fn new(reducer: Arc<dyn StateReducer>) -> Self {
        Self {
            reducer,
            state: None,
        }
    }

    pub fn state(&self) -> Option<&Value> {
        self.state.as_ref()
    }

    /// Decide which event, if any, `message` produces.
    ///
    /// Returns `None` for pings and non-payload events. Decode and apply
    /// failures come back as `StreamEvent::Error` and leave the state untouched.
    pub fn map(&mut self, message: &SseMessage) -> Option<StreamEvent> {
        if message.event != PAYLOAD_EVENT || message.data.is_empty() {
            debug!(
                target: "sse_state::event_mapper",
                event = %message.event,
                id = %message.id,
                "ignoring message without payload"
            );
            return None;
        }

        match self.fold(&message.data) {
            Ok(state) => Some(StreamEvent::Message { state }),
            Err(error) => {
                debug!(
                    target: "sse_state::event_mapper",
                    id = %message.id,
                    error = %error,
                    "rejected payload"
                );
                Some(StreamEvent::Error { error })
            }
        }
    }

    fn fold(&mut self, data: &str) -> Result<Value, StreamError> {
        let operations = decode_patch_operations(data)?;
        let next = self.reducer.reduce(self.state.as_ref(), &operations)?;
        self.state = Some(next.clone());
        Ok(next)
    }
}

impl Default for EventMapper {
    fn default() -> Self {
        Self::new(Arc::new(JsonPatchReducer))
    }
}
