use std::pin::Pin;
use std::sync::Arc;

use futures_core::Stream;
use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::client::options::StreamOptions;
use crate::core::error::StreamError;
use crate::core::event::StreamEvent;
use crate::core::event_mapper::EventMapper;
use crate::core::options::event_stream_headers;
use crate::core::reducer::{JsonPatchReducer, StateReducer};
use crate::core::transport::{HttpTransport, StreamRequest};
use crate::streaming_sse::SseDecoder;
use crate::transport_reqwest::ReqwestTransport;

pub type EventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

/// Subscribe to the event stream at `url`.
///
/// Nothing happens until the returned stream is polled. Each attempt emits
/// `Open` once the response arrives, then one `Message` per payload folded
/// into the aggregated state. A clean end of body or a cancellation emits
/// `Close`. A transport failure restarts the whole request after the
/// configured delay; once the retry budget is spent the failure is emitted
/// as a final `Error` and the stream ends.
///
/// The aggregated state carries over from one attempt to the next, while
/// line and message decoding always restart from an empty buffer.
pub fn stream_events(url: impl Into<String>, options: StreamOptions) -> EventStream {
    let url = url.into();
    Box::pin(async_stream::stream! {
        let StreamOptions {
            method,
            headers,
            body,
            cancel,
            transport_config,
            retry,
            transport,
            reducer,
        } = options;

        let transport: Arc<dyn HttpTransport> = match transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&transport_config)),
        };
        let request = StreamRequest {
            url,
            method,
            headers: event_stream_headers(&headers),
            body,
        };
        let reducer: Arc<dyn StateReducer> = match reducer {
            Some(reducer) => reducer,
            None => Arc::new(JsonPatchReducer),
        };
        let mut mapper = EventMapper::new(reducer);
        let mut retries = 0u32;

        loop {
            debug!(
                target: "sse_state::client",
                url = %request.url,
                attempt = retries + 1,
                "opening event stream"
            );
            let opened = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                res = transport.open_stream(&request, &transport_config) => Some(res),
            };

            let failure = match opened {
                None => {
                    debug!(target: "sse_state::client", "cancelled while connecting");
                    yield StreamEvent::Close;
                    return;
                }
                Some(Err(err)) => err,
                Some(Ok(response)) => {
                    debug!(target: "sse_state::client", status = response.status, "event stream open");
                    yield StreamEvent::Open;

                    let mut body = response.body;
                    let mut decoder = SseDecoder::new();
                    let mut retry_hint = None;
                    loop {
                        let next = tokio::select! {
                            biased;
                            _ = cancel.cancelled() => None,
                            next = body.next() => Some(next),
                        };
                        match next {
                            None => {
                                debug!(target: "sse_state::client", "cancelled while streaming");
                                yield StreamEvent::Close;
                                return;
                            }
                            Some(None) => {
                                if let Some(message) = decoder.finish() {
                                    if let Some(event) = mapper.map(&message) {
                                        yield event;
                                    }
                                }
                                debug!(target: "sse_state::client", "event stream ended");
                                yield StreamEvent::Close;
                                return;
                            }
                            Some(Some(Err(err))) => break err,
                            Some(Some(Ok(chunk))) => {
                                for message in decoder.push(&chunk) {
                                    if message.retry.is_some() && message.retry != retry_hint {
                                        retry_hint = message.retry;
                                        debug!(
                                            target: "sse_state::client",
                                            retry_ms = ?retry_hint,
                                            "server retry hint ignored; using fixed delay"
                                        );
                                    }
                                    if let Some(event) = mapper.map(&message) {
                                        yield event;
                                    }
                                }
                            }
                        }
                    }
                }
            };

            if cancel.is_cancelled() {
                debug!(target: "sse_state::client", error = %failure, "cancelled after failed attempt");
                yield StreamEvent::Close;
                return;
            }

            retries += 1;
            let error = StreamError::Transport(failure);
            let delay = match retry.delay_for(retries) {
                Some(delay) => delay,
                None => {
                    warn!(
                        target: "sse_state::client",
                        error = %error.format_details(),
                        retries = retries - 1,
                        "event stream failed; retries exhausted"
                    );
                    yield StreamEvent::Error { error };
                    return;
                }
            };

            warn!(
                target: "sse_state::client",
                error = %error.format_details(),
                retry = retries,
                delay = ?delay,
                "event stream failed; retrying"
            );
            let cancelled = tokio::select! {
                biased;
                _ = cancel.cancelled() => true,
                _ = tokio::time::sleep(delay) => false,
            };
            if cancelled {
                debug!(target: "sse_state::client", "cancelled while waiting to retry");
                yield StreamEvent::Close;
                return;
            }
        }
    })
}
