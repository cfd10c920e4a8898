//! # Server-Sent Events (SSE) Parsing Library
//!
//! Transport-agnostic, incremental SSE decoding.
//!
//! This crate provides:
//! - `LineSplitter`: byte chunks to lines, tolerant of any chunk boundary
//! - `MessageAssembler`: lines to `SseMessage`s following the SSE field grammar
//! - `SseDecoder`: both stages behind one `push`/`finish` pair

pub mod lines;
pub mod message;

pub use lines::{Line, LineSplitter, Lines};
pub use message::MessageAssembler;

/// Represents a single dispatched Server-Sent Event message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseMessage {
    /// Last event ID seen on the stream (sticky across messages)
    pub id: String,
    /// Event type, empty when the message set none
    pub event: String,
    /// Data lines joined by `\n`
    pub data: String,
    /// Last valid retry hint in milliseconds (sticky across messages)
    pub retry: Option<u64>,
}

impl SseMessage {
    /// Create a new SSE message with just data
    pub fn data(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Set the event type
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    /// Set the event ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the retry hint
    pub fn with_retry(mut self, retry: u64) -> Self {
        self.retry = Some(retry);
        self
    }
}

/// Incremental SSE decoder that handles chunk boundaries correctly
#[derive(Debug, Default)]
pub struct SseDecoder {
    lines: LineSplitter,
    assembler: MessageAssembler,
}

impl SseDecoder {
    /// Create a new SSE decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Push new data chunk and get any complete messages
    pub fn push<'a>(&'a mut self, chunk: &[u8]) -> impl Iterator<Item = SseMessage> + 'a {
        let assembler = &mut self.assembler;
        self.lines
            .push(chunk)
            .filter_map(move |line| assembler.push_line(&line))
    }

    /// Finalize the stream.
    ///
    /// Only a line whose trailing `\r` was still pending can complete here;
    /// a message that never saw its blank delimiter line is dropped.
    pub fn finish(&mut self) -> Option<SseMessage> {
        let line = self.lines.finish()?;
        self.assembler.push_line(&line)
    }

    /// Check if decoder has buffered bytes of an unterminated line
    pub fn has_buffered_data(&self) -> bool {
        self.lines.has_buffered_data()
    }
}

// Optional: Stream support when the feature is enabled
#[cfg(feature = "stream")]
pub mod stream;

#[cfg(feature = "stream")]
pub use stream::{SseStream, SseStreamExt};

#[cfg(test)]
#[path = "../tests/line_tests.rs"]
mod line_tests;

#[cfg(test)]
#[path = "../tests/message_tests.rs"]
mod message_tests;

#[cfg(test)]
#[path = "../tests/decoder_tests.rs"]
mod decoder_tests;

#[cfg(all(test, feature = "stream"))]
#[path = "../tests/stream_tests.rs"]
mod stream_tests;
