use crate::streaming_sse::{SseDecoder, SseMessage};

#[test]
fn test_complete_event() {
    let mut decoder = SseDecoder::new();
    let data = b"id: 123\nevent: message\ndata: test data\nretry: 5000\n\n";
    let events: Vec<_> = decoder.push(data).collect();

    assert_eq!(
        events,
        vec![SseMessage::data("test data")
            .with_event("message")
            .with_id("123")
            .with_retry(5000)]
    );
}

#[test]
fn test_chunked_input() {
    let mut decoder = SseDecoder::new();

    let events1: Vec<_> = decoder.push(b"data: hello").collect();
    assert_eq!(events1.len(), 0);

    let events2: Vec<_> = decoder.push(b" world\n\n").collect();
    assert_eq!(events2, vec![SseMessage::data("hello world")]);
}

#[test]
fn test_crlf_split_across_chunks() {
    let mut decoder = SseDecoder::new();

    assert_eq!(decoder.push(b"data: chunked\r").count(), 0);
    assert_eq!(decoder.push(b"\n\r").count(), 0);

    let events: Vec<_> = decoder.push(b"\n").collect();
    assert_eq!(events, vec![SseMessage::data("chunked")]);
}

#[test]
fn test_bare_cr_stream() {
    let mut decoder = SseDecoder::new();
    let events: Vec<_> = decoder.push(b"event: a\rdata: 1\r\rdata: 2\r").collect();
    assert_eq!(events, vec![SseMessage::data("1").with_event("a")]);

    // the final `\r` is only known to be a delimiter once the stream ends
    assert_eq!(decoder.push(b"\r").count(), 0);
    assert_eq!(decoder.finish(), Some(SseMessage::data("2")));
}

#[test]
fn test_multiple_events_keep_id() {
    let mut decoder = SseDecoder::new();
    let data = b"id: 7\ndata: event1\n\ndata: event2\n\n";
    let events: Vec<_> = decoder.push(data).collect();

    assert_eq!(
        events,
        vec![
            SseMessage::data("event1").with_id("7"),
            SseMessage::data("event2").with_id("7"),
        ]
    );
}

#[test]
fn test_finish_drops_undelimited_event() {
    let mut decoder = SseDecoder::new();
    assert_eq!(decoder.push(b"data: trailing-only\n").count(), 0);
    assert_eq!(decoder.finish(), None);
}

#[test]
fn test_very_chunked_multiline() {
    let mut decoder = SseDecoder::new();

    assert_eq!(decoder.push(b"da").count(), 0);
    assert_eq!(decoder.push(b"ta: li").count(), 0);
    assert_eq!(decoder.push(b"ne 1\nda").count(), 0);
    assert_eq!(decoder.push(b"ta: line 2").count(), 0);

    let events: Vec<_> = decoder.push(b"\n\n").collect();
    assert_eq!(events, vec![SseMessage::data("line 1\nline 2")]);

    assert_eq!(decoder.push(b"").count(), 0);
}
