use crate::core::error::StreamError;
use serde_json::Value;

/// High-level event produced by an event stream subscription.
#[derive(Debug)]
pub enum StreamEvent {
    /// A connection attempt received a response and started streaming.
    Open,
    /// A patch-bearing message was folded into the aggregated state.
    Message { state: Value },
    /// The subscription ended cleanly (end of body or cancellation).
    Close,
    /// Either a message-local decode failure or the terminal failure of the subscription.
    Error { error: StreamError },
}

impl StreamEvent {
    pub fn state(&self) -> Option<&Value> {
        match self {
            StreamEvent::Message { state } => Some(state),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            StreamEvent::Close => true,
            StreamEvent::Error { error } => !error.is_message_local(),
            _ => false,
        }
    }
}
