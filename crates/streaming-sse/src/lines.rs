//! Byte chunks to SSE lines.

use bytes::Bytes;

/// One line of an event stream, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub bytes: Bytes,
    /// Offset of the first `:` in the line.
    ///
    /// `None` for empty lines and lines without a separator, `Some(0)` for
    /// comments, `Some(n)` when `bytes[..n]` is a field name.
    pub field_length: Option<usize>,
}

impl Line {
    pub fn new(bytes: impl Into<Bytes>, field_length: Option<usize>) -> Self {
        Self {
            bytes: bytes.into(),
            field_length,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        self.field_length == Some(0)
    }

    /// Field name and raw value, with one leading space stripped from the value.
    pub fn field(&self) -> Option<(&[u8], &[u8])> {
        let n = self.field_length.filter(|n| *n > 0)?;
        let name = self.bytes.get(..n)?;
        let mut value = self.bytes.get(n + 1..).unwrap_or_default();
        if value.first() == Some(&b' ') {
            value = &value[1..];
        }
        Some((name, value))
    }
}

/// Incremental splitter that turns arbitrarily chunked bytes into [`Line`]s.
///
/// Accepts `\n`, `\r\n` and bare `\r` terminators, including a `\r\n` pair
/// split across two chunks. A fresh instance is needed per stream.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
    /// Start of the current line in `buffer`.
    line_start: usize,
    /// Next byte to scan.
    position: usize,
    /// First separator seen in the current line, relative to `line_start`.
    field_length: Option<usize>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and return the lines it completes.
    ///
    /// The iterator is lazy: lines are cut out of the buffer as it is advanced.
    /// Lines not pulled before the iterator is dropped are returned by the
    /// next call.
    pub fn push(&mut self, chunk: &[u8]) -> Lines<'_> {
        if self.line_start > 0 {
            self.buffer.drain(..self.line_start);
            self.position -= self.line_start;
            self.line_start = 0;
        }
        self.buffer.extend_from_slice(chunk);
        Lines { splitter: self }
    }

    /// Flush at end of stream.
    ///
    /// Completes a line whose `\r` terminator was held back waiting for a
    /// possible `\n`. An unterminated remainder is discarded.
    pub fn finish(&mut self) -> Option<Line> {
        let held_cr = self.position + 1 == self.buffer.len()
            && self.buffer.get(self.position) == Some(&b'\r');
        let line = held_cr.then(|| self.cut_line(self.position, self.position + 1));
        self.buffer.clear();
        self.line_start = 0;
        self.position = 0;
        self.field_length = None;
        line
    }

    /// True when bytes of an unterminated line are buffered.
    pub fn has_buffered_data(&self) -> bool {
        self.buffer.len() > self.line_start
    }

    fn next_line(&mut self) -> Option<Line> {
        while self.position < self.buffer.len() {
            let idx = self.position;
            match self.buffer[idx] {
                b':' => {
                    if self.field_length.is_none() {
                        self.field_length = Some(idx - self.line_start);
                    }
                    self.position += 1;
                }
                b'\n' => {
                    let end = if idx > self.line_start && self.buffer[idx - 1] == b'\r' {
                        idx - 1
                    } else {
                        idx
                    };
                    return Some(self.cut_line(end, idx + 1));
                }
                b'\r' => match self.buffer.get(idx + 1) {
                    // a `\n` may still arrive in the next chunk
                    None => return None,
                    Some(b'\n') => self.position += 1,
                    Some(_) => return Some(self.cut_line(idx, idx + 1)),
                },
                _ => self.position += 1,
            }
        }
        None
    }

    fn cut_line(&mut self, end: usize, next_start: usize) -> Line {
        let line = Line::new(
            Bytes::copy_from_slice(&self.buffer[self.line_start..end]),
            self.field_length.take(),
        );
        self.line_start = next_start;
        self.position = next_start;
        line
    }
}

/// Lines completed by one [`LineSplitter::push`].
pub struct Lines<'a> {
    splitter: &'a mut LineSplitter,
}

impl Iterator for Lines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        self.splitter.next_line()
    }
}
