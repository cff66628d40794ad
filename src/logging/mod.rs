//! Logging system for superlog
//!
//! Provides the log router and its sinks: a timestamped file with age-based
//! retention, the console, and the line buffer behind the on-screen panel. The
//! `tracing` bridge lets the host's own log calls flow through all of them.

mod buffer;
mod console;
mod error;
mod file_sink;
mod layer;
mod retention;
mod router;

pub use buffer::{split_message, LogBuffer, LogLevel, LogLine, DEFAULT_MAX_LINES};
pub use console::{ansi_color_for_level, emoji_for_level, ConsoleSink};
pub use error::{Result, SuperLogError};
pub use file_sink::{create_log_file_path, format_file_line, FileSink};
pub use layer::{init_superlog, SuperLogLayer, DEFAULT_FILTER};
pub use retention::{
    cleanup_old_logs, clear_logs_older_than, clear_old_logs, DEFAULT_RETENTION_DAYS,
};
pub use router::{format_prefixed, type_name_of, SuperLog, SELF_MODULE, START_LINE};
