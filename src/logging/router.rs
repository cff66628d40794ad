//! Log router
//!
//! `SuperLog` receives leveled, module-tagged log calls and dispatches them to
//! the enabled sinks: a timestamped file, the console and the on-screen panel.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, RwLock};

use ratatui::prelude::{Frame, Rect};
use ratatui::style::Color;

use super::buffer::LogLevel;
use super::console::ConsoleSink;
use super::file_sink::FileSink;
use super::retention;
use crate::config::SuperLogConfig;
use crate::panel::LogPanel;

/// Module name used for the logger's own messages
pub const SELF_MODULE: &str = "superlog";

/// First line of every panel, so the tab has something to show
pub const START_LINE: &str = "################## superlog start ##################";

static GLOBAL: OnceLock<Arc<SuperLog>> = OnceLock::new();

/// Fans log calls out to file, console and screen
pub struct SuperLog {
    file: Option<FileSink>,
    console: Option<ConsoleSink>,
    panel: LogPanel,
    log_directory: Option<PathBuf>,
    min_level: RwLock<LogLevel>,
    synchronized: std::sync::atomic::AtomicBool,
    /// Held for a whole dispatch when synchronized logging is on
    sync_lock: Mutex<()>,
}

impl SuperLog {
    /// Build a logger from `config`
    ///
    /// A file sink that cannot be created is reported through the remaining
    /// sinks and left out; construction itself never fails.
    pub fn new(config: &SuperLogConfig) -> Self {
        let (file, file_error) = if config.write_to_file {
            match FileSink::create(&config.log_directory) {
                Ok(sink) => {
                    sink.set_timestamps(config.file_timestamps);
                    (Some(sink), None)
                }
                Err(e) => (None, Some(e)),
            }
        } else {
            (None, None)
        };

        let console = config.write_to_console.then(|| {
            let console = ConsoleSink::new();
            console.set_color(config.color_term);
            console.set_timestamps(config.console_timestamps);
            console
        });

        let panel = LogPanel::new(config.max_lines);
        panel.set_enabled(config.draw_to_screen);
        panel.set_minimized(!config.maximized);
        panel.set_use_colors(config.use_screen_colors);
        panel.set_width_pct(config.display_width);
        panel.log(LogLevel::Warning, "", START_LINE);

        let logger = Self {
            file,
            console,
            panel,
            log_directory: config.write_to_file.then(|| config.log_directory.clone()),
            min_level: RwLock::new(config.min_level),
            synchronized: std::sync::atomic::AtomicBool::new(config.synchronized),
            sync_lock: Mutex::new(()),
        };

        if let Some(e) = file_error {
            logger.log(LogLevel::Error, SELF_MODULE, &e.to_string());
        }

        logger
    }

    /// Install the process-wide logger
    ///
    /// The first call wins; later calls return the logger that is already
    /// installed and ignore `config`.
    pub fn install(config: &SuperLogConfig) -> Arc<SuperLog> {
        if let Some(existing) = GLOBAL.get() {
            return Arc::clone(existing);
        }
        Self::install_logger(Arc::new(SuperLog::new(config)))
    }

    /// Make an already built logger the process-wide one
    ///
    /// Returns the installed logger, which is `logger` unless another one got
    /// there first.
    pub fn install_logger(logger: Arc<SuperLog>) -> Arc<SuperLog> {
        match GLOBAL.set(Arc::clone(&logger)) {
            Ok(()) => logger,
            // Lost a race with another installer
            Err(_) => GLOBAL.get().map(Arc::clone).unwrap_or(logger),
        }
    }

    /// The process-wide logger, if one has been installed
    pub fn global() -> Option<Arc<SuperLog>> {
        GLOBAL.get().map(Arc::clone)
    }

    /// Dispatch a log call to every enabled sink
    pub fn log(&self, level: LogLevel, module: &str, message: &str) {
        if level < self.min_level() {
            return;
        }

        let _guard = self
            .is_synchronized()
            .then(|| self.sync_lock.lock().unwrap_or_else(|e| e.into_inner()));

        if let Some(file) = &self.file {
            file.log(level, module, message);
        }
        if let Some(console) = &self.console {
            console.log(level, module, message);
        }
        if self.panel.is_enabled() {
            self.panel.log(level, module, message);
        }
    }

    /// Render `args` once and send the same text to every sink
    ///
    /// The text is prefixed with the level and module, e.g. `[warning] net timeout`.
    pub fn log_fmt(&self, level: LogLevel, module: &str, args: fmt::Arguments<'_>) {
        if level < self.min_level() {
            return;
        }
        let text = format_prefixed(level, module, args);
        self.log(level, module, &text);
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level.read().map(|l| *l).unwrap_or(LogLevel::Verbose)
    }

    pub fn set_min_level(&self, level: LogLevel) {
        if let Ok(mut min_level) = self.min_level.write() {
            *min_level = level;
        }
    }

    /// Lines kept by the on-screen panel
    pub fn set_max_lines(&self, max_lines: usize) {
        self.panel.set_max_lines(max_lines);
    }

    pub fn set_screen_logging_enabled(&self, enabled: bool) {
        self.panel.set_enabled(enabled);
    }

    pub fn is_screen_logging_enabled(&self) -> bool {
        self.panel.is_enabled()
    }

    /// Open or minimize the on-screen panel
    pub fn set_maximized(&self, maximized: bool) {
        self.panel.set_minimized(!maximized);
    }

    /// Hold a lock across each dispatch so concurrent calls never interleave
    pub fn set_synchronized(&self, synchronized: bool) {
        self.synchronized
            .store(synchronized, std::sync::atomic::Ordering::Relaxed);
    }

    pub fn is_synchronized(&self) -> bool {
        self.synchronized.load(std::sync::atomic::Ordering::Relaxed)
    }

    pub fn set_use_screen_colors(&self, use_colors: bool) {
        self.panel.set_use_colors(use_colors);
    }

    pub fn set_level_color(&self, level: LogLevel, color: Color) {
        self.panel.set_level_color(level, color);
    }

    /// Color console level tags with ANSI codes
    pub fn set_color_term(&self, color: bool) {
        if let Some(console) = &self.console {
            console.set_color(color);
        }
    }

    /// Share of the screen width the open panel covers
    pub fn set_display_width(&self, width_pct: f32) {
        self.panel.set_width_pct(width_pct);
    }

    pub fn set_file_timestamps(&self, enabled: bool) {
        if let Some(file) = &self.file {
            file.set_timestamps(enabled);
        }
    }

    pub fn set_console_timestamps(&self, enabled: bool) {
        if let Some(console) = &self.console {
            console.set_timestamps(enabled);
        }
    }

    /// File currently being written, if file logging is active
    pub fn current_log_file(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path())
    }

    pub fn is_logging_to_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn is_logging_to_console(&self) -> bool {
        self.console.is_some()
    }

    /// The on-screen panel, for drawing and input routing
    pub fn panel(&self) -> &LogPanel {
        &self.panel
    }

    /// Draw the on-screen panel
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        self.panel.draw(frame, area);
    }

    /// Delete log files older than `num_days` from this logger's directory
    ///
    /// Returns the number of files deleted. Problems are logged, not returned.
    pub fn clear_old_logs(&self, num_days: u64) -> usize {
        let Some(dir) = &self.log_directory else {
            self.log(
                LogLevel::Error,
                SELF_MODULE,
                "Cannot clear old logs: file logging is disabled",
            );
            return 0;
        };

        match retention::clear_old_logs(dir, num_days) {
            Ok(count) => {
                if count > 0 {
                    self.log(
                        LogLevel::Notice,
                        SELF_MODULE,
                        &format!("Cleaned up {} old log files", count),
                    );
                }
                count
            }
            Err(e) => {
                self.log(LogLevel::Error, SELF_MODULE, &e.to_string());
                0
            }
        }
    }
}

/// `[level] module text`, or `[level] text` without a module
pub fn format_prefixed(level: LogLevel, module: &str, args: fmt::Arguments<'_>) -> String {
    if module.is_empty() {
        format!("[{}] {}", level, args)
    } else {
        format!("[{}] {} {}", level, module, args)
    }
}

/// Log through the process-wide logger with `format!` arguments
///
/// Does nothing when no logger is installed.
#[macro_export]
macro_rules! superlog {
    ($level:expr, $module:expr, $($arg:tt)+) => {
        if let Some(logger) = $crate::logging::SuperLog::global() {
            logger.log_fmt($level, $module, format_args!($($arg)+));
        }
    };
}

/// Full type name of the value behind a reference
pub fn type_name_of<T: ?Sized>(_value: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// Module tag naming the caller
///
/// - `superlog_module!()`: the calling module's path
/// - `superlog_module!(self)`: the type of `self`, e.g. `app::Player`
/// - `superlog_module!(self, line)`: the type of `self` plus the source line
#[macro_export]
macro_rules! superlog_module {
    () => {
        module_path!()
    };
    ($value:expr, line) => {
        format!("{}:{}", $crate::logging::type_name_of(&*$value), line!())
    };
    ($value:expr) => {
        $crate::logging::type_name_of(&*$value)
    };
}
