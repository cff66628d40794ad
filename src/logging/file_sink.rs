//! File sink
//!
//! Appends one formatted line per log call to `<directory>/<timestamp>.log`.
//! A new file is started for every run.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Local;

use super::buffer::LogLevel;
use super::error::{Result, SuperLogError};

/// Generate a timestamped log file path
pub fn create_log_file_path(logs_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S-%3f");
    logs_dir.join(format!("{}.log", timestamp))
}

/// Format one file line
pub fn format_file_line(
    level: LogLevel,
    module: &str,
    message: &str,
    with_timestamp: bool,
) -> String {
    let mut line = String::new();
    if with_timestamp {
        line.push_str(&format!("[{}] ", Local::now().format("%Y-%m-%d %H:%M:%S%.3f")));
    }
    line.push_str(&format!("[{}] ", level.tag()));
    if !module.is_empty() {
        line.push_str(module);
        line.push_str(": ");
    }
    line.push_str(message);
    line
}

/// Appends formatted lines to a timestamped file
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
    timestamps: AtomicBool,
    /// Set after the first write failure so it is reported only once
    failed: AtomicBool,
}

impl FileSink {
    /// Create the directory if missing and open a fresh timestamped file in it
    pub fn create(logs_dir: &Path) -> Result<Self> {
        if !logs_dir.exists() {
            fs::create_dir_all(logs_dir).map_err(|source| SuperLogError::CreateDir {
                path: logs_dir.to_path_buf(),
                source,
            })?;
        }
        Self::open(create_log_file_path(logs_dir))
    }

    /// Open (or append to) a specific file
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SuperLogError::OpenFile {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            file: Mutex::new(file),
            timestamps: AtomicBool::new(true),
            failed: AtomicBool::new(false),
        })
    }

    /// Path of the file being written
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether each line starts with a date/time prefix
    pub fn set_timestamps(&self, enabled: bool) {
        self.timestamps.store(enabled, Ordering::Relaxed);
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps.load(Ordering::Relaxed)
    }

    /// Write one log call
    pub fn log(&self, level: LogLevel, module: &str, message: &str) {
        let line = format_file_line(level, module, message, self.timestamps());
        let result = match self.file.lock() {
            Ok(mut file) => writeln!(file, "{}", line).and_then(|_| file.flush()),
            Err(_) => return,
        };

        // The tracing bridge may route back into this sink, so report on stderr
        if let Err(e) = result {
            if !self.failed.swap(true, Ordering::Relaxed) {
                eprintln!("superlog: failed to write {}: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_log_file_path() {
        let logs_dir = PathBuf::from("/tmp/superlog/logs");
        let path = create_log_file_path(&logs_dir);
        assert!(path.starts_with(&logs_dir));
        assert!(path.to_string_lossy().ends_with(".log"));
    }

    #[test]
    fn test_format_file_line_without_timestamp() {
        let line = format_file_line(LogLevel::Warning, "net", "timeout", false);
        assert_eq!(line, "[WARNING] net: timeout");

        let line = format_file_line(LogLevel::Notice, "", "bare", false);
        assert_eq!(line, "[NOTICE] bare");
    }

    #[test]
    fn test_format_file_line_with_timestamp() {
        let line = format_file_line(LogLevel::Error, "db", "down", true);
        assert!(line.starts_with('['));
        assert!(line.ends_with("[ERROR] db: down"));
    }

    #[test]
    fn test_create_makes_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let logs_dir = temp_dir.path().join("nested").join("logs");

        let sink = FileSink::create(&logs_dir).unwrap();
        assert!(logs_dir.is_dir());
        assert!(sink.path().exists());
    }

    #[test]
    fn test_log_appends_lines() {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileSink::create(temp_dir.path()).unwrap();
        sink.set_timestamps(false);

        sink.log(LogLevel::Notice, "app", "one");
        sink.log(LogLevel::Error, "app", "two");

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "[NOTICE] app: one\n[ERROR] app: two\n");
    }
}
