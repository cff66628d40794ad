//! In-memory log buffer for the on-screen panel
//!
//! Provides a bounded ring buffer of log lines. A single mutex guards both the
//! append path (any thread calling into the logger) and the snapshot path (the
//! render pass), so readers never observe a half-applied append.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Default number of lines kept for display
pub const DEFAULT_MAX_LINES: usize = 300;

/// Severity of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Verbose,
    Notice,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// All levels, lowest first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Verbose,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "verbose",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    /// Upper-case tag used in file and console lines
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "VERBOSE",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Whether console output for this level belongs on stderr
    pub fn is_error(&self) -> bool {
        matches!(self, LogLevel::Error | LogLevel::Fatal)
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => LogLevel::Verbose,
            tracing::Level::INFO => LogLevel::Notice,
            tracing::Level::WARN => LogLevel::Warning,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

/// A single displayed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Module that produced the log; empty for continuation lines
    pub module: String,
    /// One line of message text
    pub message: String,
    pub level: LogLevel,
    /// When the log call happened
    pub timestamp: DateTime<Local>,
}

impl LogLine {
    /// Create a new log line stamped with the current time
    pub fn new(level: LogLevel, module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            message: message.into(),
            level,
            timestamp: Local::now(),
        }
    }

    /// Timestamp formatted for display
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S%.3f").to_string()
    }
}

/// Split a message into display lines
///
/// The first line keeps the module name, continuation lines get an empty one so
/// the panel shows the module only once per call.
pub fn split_message(level: LogLevel, module: &str, message: &str) -> Vec<LogLine> {
    let timestamp = Local::now();
    message
        .split('\n')
        .enumerate()
        .map(|(i, line)| LogLine {
            module: if i == 0 {
                module.to_string()
            } else {
                String::new()
            },
            message: line.strip_suffix('\r').unwrap_or(line).to_string(),
            level,
            timestamp,
        })
        .collect()
}

struct Inner {
    lines: VecDeque<LogLine>,
    max_lines: usize,
    /// Length of the longest module name seen so far
    max_module_len: usize,
}

impl Inner {
    fn trim(&mut self) {
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

/// Thread-safe ring buffer of log lines
pub struct LogBuffer {
    inner: Mutex<Inner>,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl LogBuffer {
    /// Create a new buffer holding at most `max_lines` lines
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                lines: VecDeque::with_capacity(max_lines.min(4096)),
                max_lines,
                max_module_len: 0,
            }),
        }
    }

    /// Append a log call, splitting multi-line messages
    ///
    /// Returns the number of lines appended.
    pub fn push(&self, level: LogLevel, module: &str, message: &str) -> usize {
        let lines = split_message(level, module, message);
        let count = lines.len();
        self.extend(lines);
        count
    }

    /// Append already-built lines, dropping the oldest beyond capacity
    pub fn extend(&self, lines: impl IntoIterator<Item = LogLine>) {
        if let Ok(mut inner) = self.inner.lock() {
            for line in lines {
                let len = line.module.chars().count();
                if len > inner.max_module_len {
                    inner.max_module_len = len;
                }
                inner.lines.push_back(line);
            }
            inner.trim();
        }
    }

    /// Copy the current contents for rendering
    pub fn snapshot(&self) -> Vec<LogLine> {
        self.inner
            .lock()
            .map(|inner| inner.lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Change the capacity, dropping the oldest lines if needed
    pub fn set_max_lines(&self, max_lines: usize) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.max_lines = max_lines;
            inner.trim();
        }
    }

    /// Current capacity
    pub fn max_lines(&self) -> usize {
        self.inner.lock().map(|i| i.max_lines).unwrap_or(0)
    }

    /// Length of the longest module name seen so far
    pub fn max_module_len(&self) -> usize {
        self.inner.lock().map(|i| i.max_module_len).unwrap_or(0)
    }

    /// Get the number of lines in the buffer
    pub fn len(&self) -> usize {
        self.inner.lock().map(|i| i.lines.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every line
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.lines.clear();
        }
    }
}
