/// Content type requested from event stream endpoints.
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

/// Returns true if `headers` already carry `name` (case-insensitive).
pub fn has_header(headers: &[(String, String)], name: &str) -> bool {
    headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
}

/// Append `name: value` unless the caller already supplied that header.
pub fn with_default_header(
    mut headers: Vec<(String, String)>,
    name: &str,
    value: &str,
) -> Vec<(String, String)> {
    if !has_header(&headers, name) {
        headers.push((name.to_string(), value.to_string()));
    }
    headers
}

/// Request headers with `accept: text/event-stream` filled in when absent.
pub fn event_stream_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    with_default_header(headers.to_vec(), "accept", EVENT_STREAM_CONTENT_TYPE)
}
