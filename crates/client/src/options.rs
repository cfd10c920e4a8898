use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::reducer::StateReducer;
use crate::core::retry::RetryConfig;
use crate::core::transport::{HttpTransport, TransportBody, TransportConfig};

/// Request and retry settings for one event stream subscription.
#[derive(Clone)]
pub struct StreamOptions {
    pub method: http::Method,
    /// Extra request headers; `accept: text/event-stream` is added when absent.
    pub headers: Vec<(String, String)>,
    pub body: Option<TransportBody>,
    /// Cancelling ends the subscription with a `Close` event.
    pub cancel: CancellationToken,
    pub transport_config: TransportConfig,
    pub retry: RetryConfig,
    /// Request opener; a reqwest transport built from `transport_config` when unset.
    pub transport: Option<Arc<dyn HttpTransport>>,
    /// Patch fold; RFC 6902 when unset.
    pub reducer: Option<Arc<dyn StateReducer>>,
}

impl StreamOptions {
    pub fn with_method(mut self, method: http::Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(TransportBody::Json(body));
        self
    }

    pub fn with_text_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(TransportBody::Text(body.into()));
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_transport_config(mut self, cfg: TransportConfig) -> Self {
        self.transport_config = cfg;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_reducer(mut self, reducer: Arc<dyn StateReducer>) -> Self {
        self.reducer = Some(reducer);
        self
    }
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            method: http::Method::GET,
            headers: Vec::new(),
            body: None,
            cancel: CancellationToken::new(),
            transport_config: TransportConfig::default(),
            retry: RetryConfig::default(),
            transport: None,
            reducer: None,
        }
    }
}
