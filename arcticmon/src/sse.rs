//! Server-Sent Events framing for the live stream.
//!
//! Only what the dashboard server emits is handled: `\n` or `\r\n` line
//! endings, `data:` fields, `:` comments and blank-line frame boundaries.
//! `event`, `id` and `retry` fields are accepted and ignored.

use bytes::BytesMut;

#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: BytesMut,
    data: String,
    has_data: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of the response body; returns the data of every frame
    /// completed by it, in order. Partial lines are kept for the next call.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line = self.buf.split_to(pos + 1);
            line.truncate(pos);
            if line.last() == Some(&b'\r') {
                line.truncate(pos - 1);
            }
            let text = String::from_utf8_lossy(&line).into_owned();
            if let Some(frame) = self.line(&text) {
                frames.push(frame);
            }
        }
        frames
    }

    fn line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            if !self.has_data {
                return None;
            }
            self.has_data = false;
            let mut data = std::mem::take(&mut self.data);
            data.pop(); // trailing '\n' added per data line
            return Some(data);
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((f, v)) => (f, v.strip_prefix(' ').unwrap_or(v)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push_str(value);
            self.data.push('\n');
            self.has_data = true;
        }
        None
    }
}
