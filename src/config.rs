//! Configuration management for superlog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::{LogLevel, DEFAULT_MAX_LINES, DEFAULT_RETENTION_DAYS};
use crate::panel::DEFAULT_WIDTH_PCT;

/// Logger configuration
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperLogConfig {
    /// Write every log call to the console
    pub write_to_console: bool,

    /// Keep lines for the on-screen panel
    pub draw_to_screen: bool,

    /// Write every log call to a timestamped file in `log_directory`
    pub write_to_file: bool,

    /// Directory for timestamped log files, created if missing
    pub log_directory: PathBuf,

    /// Lines kept for the on-screen panel (default: 300)
    pub max_lines: usize,

    /// Start with the panel open instead of minimized
    pub maximized: bool,

    /// Share of the screen width the open panel covers, 0.1..=1.0 (default: 0.85)
    pub display_width: f32,

    /// Color panel lines by level and module
    pub use_screen_colors: bool,

    /// Color console level tags with ANSI codes
    pub color_term: bool,

    /// Prefix file lines with a date and time
    pub file_timestamps: bool,

    /// Prefix console lines with a time
    pub console_timestamps: bool,

    /// Serialize each log call across all sinks
    ///
    /// Keeps lines from different threads from interleaving, at the cost of a
    /// lock per call.
    pub synchronized: bool,

    /// Log files older than this many days are deleted at startup (default: 7)
    pub retention_days: u64,

    /// Calls below this level are dropped
    pub min_level: LogLevel,
}

impl Default for SuperLogConfig {
    fn default() -> Self {
        Self {
            write_to_console: true,
            draw_to_screen: true,
            write_to_file: true,
            log_directory: PathBuf::from("logs"),
            max_lines: DEFAULT_MAX_LINES,
            maximized: false,
            display_width: DEFAULT_WIDTH_PCT,
            use_screen_colors: true,
            color_term: false,
            file_timestamps: true,
            console_timestamps: false,
            synchronized: false,
            retention_days: DEFAULT_RETENTION_DAYS,
            min_level: LogLevel::Verbose,
        }
    }
}

impl SuperLogConfig {
    /// Load configuration from the default file, or return defaults if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Builder-style toggle for the console sink
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.write_to_console = enabled;
        self
    }

    /// Builder-style toggle for the on-screen panel
    pub fn with_screen(mut self, enabled: bool) -> Self {
        self.draw_to_screen = enabled;
        self
    }

    /// Builder-style log directory; `None` disables the file sink
    pub fn with_log_directory(mut self, dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => {
                self.write_to_file = true;
                self.log_directory = dir;
            }
            None => self.write_to_file = false,
        }
        self
    }
}

/// Get the base configuration directory (~/.superlog)
/// Falls back to ./.superlog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| PathBuf::from(".superlog"))
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".superlog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
