//! LogState - Activity Log with Ring Buffer

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn color(&self) -> gpui::Rgba {
        match self {
            LogLevel::Info => gpui::rgba(0x22c55eff),
            LogLevel::Warn => gpui::rgba(0xf59e0bff),
            LogLevel::Error => gpui::rgba(0xef4444ff),
            LogLevel::Debug => gpui::rgba(0x6b7280ff),
        }
    }
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: u64,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// State for activity log messages using a ring buffer
#[derive(Debug)]
pub struct LogState {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl LogState {
    /// Create a new log state with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_id: 1,
        }
    }

    /// Push a new log entry, evicting the oldest at capacity
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>, timestamp: DateTime<Local>) {
        let entry = LogEntry {
            id: self.next_id,
            level,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Get all log entries, oldest first
    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for LogState {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut log = LogState::new(2);
        log.push(LogLevel::Info, "first", Local::now());
        log.push(LogLevel::Info, "second", Local::now());
        log.push(LogLevel::Warn, "third", Local::now());
        assert_eq!(log.len(), 2);
        let messages: Vec<&str> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["second", "third"]);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut log = LogState::new(10);
        log.push(LogLevel::Info, "a", Local::now());
        log.push(LogLevel::Info, "b", Local::now());
        let ids: Vec<u64> = log.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 2]);
    }
}
