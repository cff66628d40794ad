//! Log file retention management
//!
//! Handles cleanup of old log files based on age.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use super::error::{Result, SuperLogError};

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Clean up log files older than the default retention period
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(logs_dir: &Path) -> Result<usize> {
    clear_old_logs(logs_dir, DEFAULT_RETENTION_DAYS)
}

/// Delete `*.log` files in `logs_dir` last modified more than `num_days` days ago
///
/// Returns the number of files deleted.
pub fn clear_old_logs(logs_dir: &Path, num_days: u64) -> Result<usize> {
    clear_logs_older_than(logs_dir, Duration::from_secs(num_days * 24 * 60 * 60))
}

/// Delete `*.log` files in `logs_dir` older than `max_age`
pub fn clear_logs_older_than(logs_dir: &Path, max_age: Duration) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let cutoff = SystemTime::now()
        .checked_sub(max_age)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let read_dir = fs::read_dir(logs_dir).map_err(|source| SuperLogError::ReadDir {
        path: logs_dir.to_path_buf(),
        source,
    })?;

    let mut deleted_count = 0;

    for entry in read_dir.flatten() {
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("log") {
            continue;
        }

        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };

        if modified < cutoff {
            match fs::remove_file(&path) {
                Ok(()) => deleted_count += 1,
                Err(e) => tracing::warn!("Failed to delete old log {}: {}", path.display(), e),
            }
        }
    }

    Ok(deleted_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let count = cleanup_old_logs(temp_dir.path()).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cleanup_nonexistent_dir() {
        let path = Path::new("/nonexistent/path/for/testing");
        let count = clear_old_logs(path, 1).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cleanup_keeps_recent_files() {
        let temp_dir = TempDir::new().unwrap();

        let log_file = temp_dir.path().join("2026-01-21-14-30-45-000.log");
        File::create(&log_file)
            .unwrap()
            .write_all(b"test log content")
            .unwrap();

        let count = cleanup_old_logs(temp_dir.path()).unwrap();
        assert_eq!(count, 0);
        assert!(log_file.exists());
    }

    #[test]
    fn test_cleanup_removes_only_old_log_files() {
        let temp_dir = TempDir::new().unwrap();

        let log_file = temp_dir.path().join("old.log");
        File::create(&log_file).unwrap().write_all(b"x").unwrap();
        let other_file = temp_dir.path().join("notes.txt");
        File::create(&other_file).unwrap().write_all(b"x").unwrap();

        thread::sleep(Duration::from_millis(20));

        let count = clear_logs_older_than(temp_dir.path(), Duration::from_millis(5)).unwrap();
        assert_eq!(count, 1);
        assert!(!log_file.exists());
        assert!(other_file.exists());
    }
}
