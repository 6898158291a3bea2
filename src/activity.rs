//! Bounded activity log.
//!
//! Two write paths feed the same display list: instant local echoes around
//! one-shot actions, and a periodic full overwrite from the server's
//! canonical log. The overwrite is deliberately not a merge; local echoes
//! are transient and may be superseded within one polling interval.

use serde::{Deserialize, Serialize};

use crate::wire::ServerLogEntry;

/// Most recent entries kept for display, newest first. Trimming only ever
/// affects the visible list, not any server-side store.
pub const LOG_DISPLAY_LIMIT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Error => "ERROR",
        }
    }

    /// Unknown server levels fall back to INFO rather than dropping the
    /// entry.
    pub fn from_server(level: &str) -> Self {
        match level.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => LogLevel::Success,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Stable identity for keyed rendering; never reused within one log.
    pub id: u64,
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ActivityLog {
    next_id: u64,
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Local echo: inserted at the front so the user action reads as
    /// instantaneous, independent of network latency.
    pub fn push(&mut self, timestamp: String, level: LogLevel, message: String) {
        let id = self.assign_id();
        self.entries.insert(
            0,
            LogEntry {
                id,
                timestamp,
                level,
                message,
            },
        );
        self.entries.truncate(LOG_DISPLAY_LIMIT);
    }

    /// Authoritative replace: the server list is chronological, the display
    /// wants newest first, and only the most recent entries survive.
    pub fn replace_from_server(&mut self, logs: Vec<ServerLogEntry>) {
        let mut entries = Vec::with_capacity(LOG_DISPLAY_LIMIT);
        for e in logs.into_iter().rev().take(LOG_DISPLAY_LIMIT) {
            let id = self.assign_id();
            entries.push(LogEntry {
                id,
                timestamp: e.timestamp,
                level: LogLevel::from_server(&e.level),
                message: e.message,
            });
        }
        self.entries = entries;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
