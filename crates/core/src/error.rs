use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Failure surfaced to the consumer inside a `StreamEvent::Error`.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("patch rejected: {0}")]
    Reduce(#[from] ReduceError),
}

impl StreamError {
    /// True when the failure only concerns a single message and the stream keeps going.
    pub fn is_message_local(&self) -> bool {
        matches!(self, StreamError::Payload(_) | StreamError::Reduce(_))
    }

    /// Format error details for logs without leaking upstream bodies.
    pub fn format_details(&self) -> String {
        match self {
            StreamError::Transport(te) => format!("transport error: {}", te.sanitized_message()),
            StreamError::Payload(se) => format!("malformed payload: {}", se),
            StreamError::Reduce(re) => format!("patch rejected: {}", re),
        }
    }
}

/// Failure raised by a `StateReducer` while folding patch operations.
#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("invalid patch operation at index {index}: {message}")]
    InvalidOperation { index: usize, message: String },
    #[error("{0}")]
    Apply(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http status {status}: {sanitized}")]
    HttpStatus {
        status: u16,
        /// upstream body (should be treated as sensitive; only log sanitized)
        body: String,
        /// Sanitized message for display
        sanitized: String,
        /// Upstream response headers (lowercased keys where possible)
        headers: Vec<(String, String)>,
    },
    #[error("network: {0}")]
    Network(String),
    #[error("connect timeout after {0:?}")]
    ConnectTimeout(Duration),
    #[error("idle read timeout after {0:?}")]
    IdleReadTimeout(Duration),
    #[error("body read error: {0}")]
    BodyRead(String),
    #[error("other: {0}")]
    Other(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn sanitized_message(&self) -> String {
        match self {
            TransportError::HttpStatus { status, .. } => http_status_fallback_message(*status),
            _ => self.to_string(),
        }
    }
}

pub fn http_status_fallback_message(status: u16) -> String {
    format!("http status {status}")
}

pub fn build_http_status_transport_error(
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
) -> TransportError {
    let sanitized = display_body_for_error(&body);
    TransportError::HttpStatus {
        status,
        body,
        sanitized,
        headers,
    }
}

/// Summarise an upstream body: minified JSON when it parses, else only its size.
pub fn display_body_for_error(body: &str) -> String {
    let trimmed = body.trim();
    let looks_like_json = trimmed.starts_with('{') || trimmed.starts_with('[');
    if looks_like_json {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(v) => v.to_string(),
            Err(_) => format!("{} bytes", body.len()),
        }
    } else {
        format!("{} bytes", body.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        build_http_status_transport_error, display_body_for_error, http_status_fallback_message,
        ReduceError, StreamError, TransportError,
    };

    #[test]
    fn http_status_error_keeps_body_out_of_sanitized_message() {
        let built = build_http_status_transport_error(
            503,
            "upstream unavailable".into(),
            vec![("x-test".into(), "1".into())],
        );
        assert_eq!(built.status(), Some(503));
        assert_eq!(built.sanitized_message(), "http status 503");
        match built {
            TransportError::HttpStatus {
                sanitized, headers, ..
            } => {
                assert_eq!(sanitized, "20 bytes");
                assert_eq!(headers.len(), 1);
            }
            other => panic!("unexpected transport variant: {other:?}"),
        }
    }

    #[test]
    fn json_bodies_are_minified_for_display() {
        assert_eq!(
            display_body_for_error("{ \"error\" : \"teapot\" }"),
            "{\"error\":\"teapot\"}"
        );
        assert_eq!(display_body_for_error("[oops"), "5 bytes");
        assert_eq!(http_status_fallback_message(404), "http status 404");
    }

    #[test]
    fn only_decode_failures_are_message_local() {
        let payload = serde_json::from_str::<Vec<u8>>("nope").unwrap_err();
        assert!(StreamError::from(payload).is_message_local());
        assert!(StreamError::from(ReduceError::Apply("bad path".into())).is_message_local());
        assert!(!StreamError::from(TransportError::BodyRead("reset".into())).is_message_local());
    }

    #[test]
    fn log_details_never_include_upstream_body() {
        let err = StreamError::from(build_http_status_transport_error(
            401,
            "{\"token\":\"secret\"}".into(),
            Vec::new(),
        ));
        let details = err.format_details();
        assert_eq!(details, "transport error: http status 401");
        assert!(!details.contains("secret"));

        let err = StreamError::from(TransportError::IdleReadTimeout(
            std::time::Duration::from_millis(50),
        ));
        assert_eq!(
            err.format_details(),
            "transport error: idle read timeout after 50ms"
        );
    }
}
