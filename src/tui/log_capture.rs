//! In-memory log sink for TUI mode
//!
//! While the alternate screen is active, tracing output must not reach
//! stderr. `LogBuffer` implements `MakeWriter` and keeps the most recent
//! lines so the debug pane can show them.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

/// Lines held between two drains of the buffer.
pub const DEFAULT_CAPACITY: usize = 500;

/// Bounded, shared queue of log lines. Oldest lines are dropped first.
#[derive(Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    // A poisoned lock still holds usable lines.
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, line: String) {
        let mut lines = self.lock();
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Remove and return every buffered line, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.lock().drain(..).collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// Per-event writer: collects bytes and forwards whole lines.
pub struct LineWriter {
    target: LogBuffer,
    partial: Vec<u8>,
}

impl LineWriter {
    fn emit(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        self.target.push(text.trim_end_matches(['\r', '\n']).to_string());
    }
}

impl Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.extend_from_slice(buf);
        while let Some(end) = self.partial.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.partial.drain(..=end).collect();
            self.emit(&line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let rest = std::mem::take(&mut self.partial);
            self.emit(&rest);
        }
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            target: self.clone(),
            partial: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_push_and_drain() {
        let buf = LogBuffer::default();
        buf.push("first".to_string());
        buf.push("second".to_string());
        assert_eq!(buf.drain(), vec!["first", "second"]);
        assert!(buf.drain().is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let buf = LogBuffer::with_capacity(3);
        for i in 0..5 {
            buf.push(format!("line {}", i));
        }
        assert_eq!(buf.drain(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_writer_splits_lines() {
        let buf = LogBuffer::default();
        let mut writer = buf.make_writer();
        write!(writer, "alpha\nbeta\ngam").unwrap();
        assert_eq!(buf.drain(), vec!["alpha", "beta"]);
        drop(writer);
        assert_eq!(buf.drain(), vec!["gam"]);
    }

    #[test]
    fn test_writer_strips_crlf() {
        let buf = LogBuffer::default();
        let mut writer = buf.make_writer();
        writer.write_all(b"windows\r\n").unwrap();
        assert_eq!(buf.drain(), vec!["windows"]);
    }
}
