use futures_core::Stream;
use futures_util::StreamExt;
use serde_json::Value;

use crate::core::error::StreamError;
use crate::core::event::StreamEvent;

/// Controls how an event stream is collapsed into its final state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamCollectorConfig {
    /// When true, a message-local decode failure aborts collection.
    pub fail_on_message_error: bool,
}

/// Outcome of draining an event stream.
#[derive(Debug, Default)]
pub struct CollectedState {
    /// Last aggregated state seen, if any payload was folded.
    pub state: Option<Value>,
    /// Number of `Message` events observed.
    pub messages: usize,
    /// Number of `Open` events observed (one per successful connection attempt).
    pub opens: usize,
    /// Message-local failures that were skipped.
    pub skipped: Vec<StreamError>,
}

/// Drain `stream` and return the final aggregated state.
///
/// A terminal `Error` event is returned as `Err`; message-local errors are
/// collected into `skipped` unless `fail_on_message_error` is set.
pub async fn collect_final_state<S>(
    stream: S,
    cfg: StreamCollectorConfig,
) -> Result<CollectedState, StreamError>
where
    S: Stream<Item = StreamEvent>,
{
    let mut out = CollectedState::default();
    futures_util::pin_mut!(stream);
    while let Some(event) = stream.next().await {
        match event {
            StreamEvent::Open => out.opens += 1,
            StreamEvent::Message { state } => {
                out.messages += 1;
                out.state = Some(state);
            }
            StreamEvent::Error { error } => {
                if error.is_message_local() && !cfg.fail_on_message_error {
                    out.skipped.push(error);
                } else {
                    return Err(error);
                }
            }
            StreamEvent::Close => break,
        }
    }
    Ok(out)
}
