use crate::core::error::{build_http_status_transport_error, TransportError};
use crate::core::json::without_null_fields;
use crate::core::transport::{
    emit_transport_event, HttpTransport, StreamRequest, StreamResponse, TransportBody,
    TransportConfig, TransportEvent,
};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::{Duration, Instant, SystemTime};
use tracing::debug;

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    fn configure_builder(
        mut builder: reqwest::ClientBuilder,
        cfg: &TransportConfig,
    ) -> reqwest::ClientBuilder {
        builder = builder
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(req_timeout) = cfg.request_timeout {
            builder = builder.timeout(req_timeout);
        }
        builder.connect_timeout(cfg.connect_timeout)
    }

    fn try_new_with_builder(
        cfg: &TransportConfig,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, TransportError> {
        let builder = Self::configure_builder(builder, cfg);
        let client = builder.build().map_err(|err| {
            TransportError::Other(format!(
                "reqwest client build failed: {}",
                format_reqwest_error_chain(&err)
            ))
        })?;
        Ok(Self { client })
    }

    fn new_with_builder(cfg: &TransportConfig, builder: reqwest::ClientBuilder) -> Self {
        match Self::try_new_with_builder(cfg, builder) {
            Ok(transport) => transport,
            Err(err) => {
                debug!(
                    target: "sse_state::transport::reqwest",
                    error = %err,
                    "falling back to reqwest::Client::new after transport init failure"
                );
                Self {
                    client: Client::new(),
                }
            }
        }
    }

    pub fn try_new(cfg: &TransportConfig) -> Result<Self, TransportError> {
        Self::try_new_with_builder(cfg, Client::builder())
    }

    pub fn new(cfg: &TransportConfig) -> Self {
        Self::new_with_builder(cfg, Client::builder())
    }

    fn build_request(
        &self,
        request: &StreamRequest,
        cfg: &TransportConfig,
    ) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(request.method.clone(), request.url.as_str());
        let has_json_body = matches!(request.body, Some(TransportBody::Json(_)));
        for (k, v) in &request.headers {
            // .json() sets its own content type
            if has_json_body && k.eq_ignore_ascii_case("content-type") {
                continue;
            }
            req = req.header(k.as_str(), v.as_str());
        }
        match &request.body {
            Some(TransportBody::Json(body)) if cfg.strip_null_fields => {
                req.json(&without_null_fields(body))
            }
            Some(TransportBody::Json(body)) => req.json(body),
            Some(TransportBody::Text(text)) => req.body(text.clone()),
            None => req,
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(&TransportConfig::default())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn open_stream(
        &self,
        request: &StreamRequest,
        cfg: &TransportConfig,
    ) -> Result<StreamResponse, TransportError> {
        let req = self.build_request(request, cfg);
        let started_at = SystemTime::now();
        let start_instant = Instant::now();
        let method = request.method.to_string();
        let request_headers = request.headers.clone();

        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                let detail = format_reqwest_error_chain(&e);
                debug!(target: "sse_state::transport::reqwest", %detail, "reqwest send failed");
                emit_transport_event(TransportEvent {
                    started_at,
                    latency: Some(start_instant.elapsed()),
                    method,
                    url: request.url.clone(),
                    status: None,
                    request_headers,
                    response_headers: Vec::new(),
                    error: Some(detail.clone()),
                });
                return Err(if e.is_connect() {
                    TransportError::Network(format!("connect: {detail}"))
                } else if e.is_timeout() {
                    TransportError::ConnectTimeout(cfg.connect_timeout)
                } else {
                    TransportError::Network(detail)
                });
            }
        };

        let status = resp.status();
        let res_headers = header_pairs(resp.headers());
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            let err =
                build_http_status_transport_error(status.as_u16(), body_text, res_headers.clone());
            emit_transport_event(TransportEvent {
                started_at,
                latency: Some(start_instant.elapsed()),
                method,
                url: request.url.clone(),
                status: Some(status.as_u16()),
                request_headers,
                response_headers: res_headers,
                error: Some(err.to_string()),
            });
            return Err(err);
        }

        emit_transport_event(TransportEvent {
            started_at,
            latency: Some(start_instant.elapsed()),
            method,
            url: request.url.clone(),
            status: Some(status.as_u16()),
            request_headers,
            response_headers: res_headers.clone(),
            error: None,
        });

        // Success: stream the bytes with idle timeout enforcement
        let idle = cfg.idle_read_timeout;
        let mut inner = resp.bytes_stream();
        let body = async_stream::try_stream! {
            loop {
                let next = tokio::time::timeout(idle, inner.next()).await;
                match next {
                    Err(_) => Err(TransportError::IdleReadTimeout(idle))?,
                    Ok(None) => break,
                    Ok(Some(Err(e))) => {
                        if e.is_timeout() { Err(TransportError::IdleReadTimeout(idle))?; }
                        else { Err(TransportError::BodyRead(format_reqwest_error_chain(&e)))?; }
                    }
                    Ok(Some(Ok(bytes))) => { yield bytes; }
                }
            }
        };

        Ok(StreamResponse {
            status: status.as_u16(),
            headers: res_headers,
            body: Box::pin(body),
        })
    }
}

fn header_pairs(headers: &http::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
        .collect()
}

fn format_reqwest_error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(src) = current {
        out.push_str(": ");
        out.push_str(&src.to_string());
        current = src.source();
    }
    out
}


#[cfg(test)]
#[path = "../tests/stream_tests.rs"]
mod stream_tests;
