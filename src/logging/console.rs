//! Console sink
//!
//! Writes one line per log call to stdout, or stderr for errors. Lines carry an
//! emoji per level and can optionally color the level tag with ANSI SGR codes.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::Local;
use crossterm::style::{Color, Stylize};

use super::buffer::LogLevel;

/// Emoji shown in front of each console line
pub fn emoji_for_level(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Verbose => "💬",
        LogLevel::Notice => "✅",
        LogLevel::Warning => "⚠️",
        LogLevel::Error => "❌",
        LogLevel::Fatal => "💀",
    }
}

/// Terminal color for a level tag
pub fn ansi_color_for_level(level: LogLevel) -> Color {
    match level {
        LogLevel::Verbose => Color::DarkGrey,
        LogLevel::Notice => Color::Blue,
        LogLevel::Warning => Color::Yellow,
        LogLevel::Error => Color::Red,
        LogLevel::Fatal => Color::Magenta,
    }
}

/// Writes formatted lines to the process console
pub struct ConsoleSink {
    color: AtomicBool,
    timestamps: AtomicBool,
    /// Width of the module column, grows with the longest module seen
    module_width: AtomicUsize,
    /// Serializes writes so stdout and stderr lines do not interleave mid-line
    write_lock: Mutex<()>,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            color: AtomicBool::new(false),
            timestamps: AtomicBool::new(false),
            module_width: AtomicUsize::new(0),
            write_lock: Mutex::new(()),
        }
    }

    /// Color the level tag with ANSI codes
    pub fn set_color(&self, enabled: bool) {
        self.color.store(enabled, Ordering::Relaxed);
    }

    pub fn color(&self) -> bool {
        self.color.load(Ordering::Relaxed)
    }

    /// Prefix lines with a wall-clock time
    pub fn set_timestamps(&self, enabled: bool) {
        self.timestamps.store(enabled, Ordering::Relaxed);
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps.load(Ordering::Relaxed)
    }

    /// Build the console line for a log call
    pub fn format_line(&self, level: LogLevel, module: &str, message: &str) -> String {
        let width = self
            .module_width
            .fetch_max(module.chars().count(), Ordering::Relaxed)
            .max(module.chars().count());

        let tag = format!("[{}]", level.tag());
        let tag = if self.color() {
            tag.with(ansi_color_for_level(level)).bold().to_string()
        } else {
            tag
        };

        let mut line = String::new();
        if self.timestamps() {
            line.push_str(&format!("[{}] ", Local::now().format("%H:%M:%S%.3f")));
        }
        line.push_str(&format!(
            "{} {} {:>width$} | {}",
            emoji_for_level(level),
            tag,
            module,
            message,
            width = width
        ));
        line
    }

    /// Write one log call to stdout or stderr
    pub fn log(&self, level: LogLevel, module: &str, message: &str) {
        let line = self.format_line(level, module, message);
        let _guard = self.write_lock.lock();
        // Console failures have nowhere better to go
        let _ = if level.is_error() {
            writeln!(io::stderr().lock(), "{}", line)
        } else {
            writeln!(io::stdout().lock(), "{}", line)
        };
    }
}
