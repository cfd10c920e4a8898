//! SSE lines to messages.

use crate::streaming_sse::lines::Line;
use crate::streaming_sse::SseMessage;

/// Accumulates SSE fields across lines and dispatches a message on every
/// delimiter (empty) line.
///
/// `id` and `retry` carry over to later messages; `event` and `data` are
/// cleared after each dispatch. Unknown fields, comments, lines without a
/// separator and malformed `retry` values are ignored.
#[derive(Debug, Default)]
pub struct MessageAssembler {
    pending: SseMessage,
}

impl MessageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line; returns the assembled message when `line` is a delimiter.
    pub fn push_line(&mut self, line: &Line) -> Option<SseMessage> {
        if line.field_length.is_none() {
            if line.is_empty() {
                return Some(self.dispatch());
            }
            return None;
        }

        if line.is_comment() {
            return None;
        }

        let (name, value) = line.field()?;
        let value = String::from_utf8_lossy(value);
        match name {
            b"id" => self.pending.id = value.into_owned(),
            b"event" => self.pending.event = value.into_owned(),
            b"data" => {
                if !self.pending.data.is_empty() {
                    self.pending.data.push('\n');
                }
                self.pending.data.push_str(&value);
            }
            b"retry" => {
                if let Ok(retry) = value.parse::<u64>() {
                    self.pending.retry = Some(retry);
                }
            }
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> SseMessage {
        SseMessage {
            id: self.pending.id.clone(),
            event: std::mem::take(&mut self.pending.event),
            data: std::mem::take(&mut self.pending.data),
            retry: self.pending.retry,
        }
    }
}
