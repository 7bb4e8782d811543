//! Ring buffer of simulator events shown under the panel.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = EventLog::new();
//! log.push("LCD ready");
//! log.push_fmt(format_args!("Mode: {}", mode.label()));
//! ```

use core::fmt::Write;

use heapless::{Deque, String};

/// Maximum number of lines kept.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Maximum characters per line.
pub const LOG_LINE_LENGTH: usize = 48;

/// Last `LOG_BUFFER_SIZE` events, oldest dropped first.
pub struct EventLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl EventLog {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Append a line, cut to `LOG_LINE_LENGTH - 1` characters.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars().take(LOG_LINE_LENGTH - 1) {
            if line.push(c).is_err() {
                break;
            }
        }
        self.buffer.push_back(line).ok();
    }

    /// Append a formatted line.
    pub fn push_fmt(
        &mut self,
        args: core::fmt::Arguments<'_>,
    ) {
        let mut text: String<128> = String::new();
        // Overlong output is cut by `push`
        text.write_fmt(args).ok();
        self.push(&text);
    }

    /// Newest `count` lines, oldest first.
    pub fn tail(
        &self,
        count: usize,
    ) -> impl Iterator<Item = &str> {
        let skip = self.buffer.len().saturating_sub(count);
        self.buffer.iter().skip(skip).map(|line| line.as_str())
    }

    pub fn len(&self) -> usize { self.buffer.len() }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_tail() {
        let mut log = EventLog::new();
        log.push("one");
        log.push("two");
        log.push("three");
        assert_eq!(log.len(), 3);
        assert_eq!(log.tail(2).collect::<Vec<_>>(), ["two", "three"]);
        assert_eq!(log.tail(10).count(), 3);
    }

    #[test]
    fn test_oldest_dropped() {
        let mut log = EventLog::new();
        for i in 0..=LOG_BUFFER_SIZE {
            log.push_fmt(format_args!("{i}"));
        }
        assert_eq!(log.len(), LOG_BUFFER_SIZE);
        assert_eq!(log.tail(LOG_BUFFER_SIZE).next(), Some("1"));
    }

    #[test]
    fn test_truncation() {
        let mut log = EventLog::new();
        log.push("This is a very long message that exceeds the maximum line length limit");
        let stored = log.tail(1).next().unwrap();
        assert_eq!(stored.len(), LOG_LINE_LENGTH - 1);
    }
}
