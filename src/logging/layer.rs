//! Bridge from `tracing` into the log router
//!
//! `SuperLogLayer` turns every tracing event into a router log call, using the
//! event's target as the module name. `init_superlog` installs it as the global
//! subscriber so `tracing::info!` and friends reach every sink.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use super::buffer::LogLevel;
use super::router::SuperLog;
use crate::config::SuperLogConfig;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "trace";

/// Collects the `message` field and appends other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

impl MessageVisitor {
    fn finish(mut self) -> String {
        self.message.push_str(&self.fields);
        self.message
    }
}

/// Tracing layer that forwards events to a [`SuperLog`]
pub struct SuperLogLayer {
    logger: Arc<SuperLog>,
}

impl SuperLogLayer {
    pub fn new(logger: Arc<SuperLog>) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for SuperLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = LogLevel::from(*metadata.level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.logger.log(level, metadata.target(), &visitor.finish());
    }
}

/// Install the process-wide logger and route `tracing` into it
///
/// The logger only becomes global once the tracing subscriber is in place; if
/// another subscriber already owns the process, nothing is installed. Old log
/// files are pruned according to `config.retention_days`.
pub fn init_superlog(config: &SuperLogConfig) -> Result<Arc<SuperLog>> {
    let logger = SuperLog::global().unwrap_or_else(|| Arc::new(SuperLog::new(config)));

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(SuperLogLayer::new(Arc::clone(&logger)))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    let logger = SuperLog::install_logger(logger);

    if logger.is_logging_to_file() {
        logger.clear_old_logs(config.retention_days);
    }

    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLine, START_LINE};
    use tracing_subscriber::layer::SubscriberExt;

    fn screen_logger() -> Arc<SuperLog> {
        Arc::new(SuperLog::new(
            &SuperLogConfig::default()
                .with_console(false)
                .with_log_directory(None),
        ))
    }

    fn logged(logger: &SuperLog) -> Vec<LogLine> {
        logger
            .panel()
            .snapshot()
            .into_iter()
            .filter(|l| l.message != START_LINE)
            .collect()
    }

    #[test]
    fn test_events_reach_the_panel() {
        let logger = screen_logger();
        let subscriber =
            tracing_subscriber::registry().with(SuperLogLayer::new(Arc::clone(&logger)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "renderer", "frame took {}ms", 16);
            tracing::warn!(target: "net", retries = 3, "connection slow");
            tracing::trace!(target: "renderer", "detail");
        });

        let lines = logged(&logger);
        assert_eq!(lines.len(), 3);

        assert_eq!(lines[0].module, "renderer");
        assert_eq!(lines[0].level, LogLevel::Notice);
        assert_eq!(lines[0].message, "frame took 16ms");

        assert_eq!(lines[1].level, LogLevel::Warning);
        assert_eq!(lines[1].message, "connection slow retries=3");

        assert_eq!(lines[2].level, LogLevel::Verbose);
    }

    #[test]
    fn test_multiline_event_is_split() {
        let logger = screen_logger();
        let subscriber =
            tracing_subscriber::registry().with(SuperLogLayer::new(Arc::clone(&logger)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "db", "query failed\nat line 3");
        });

        let lines = logged(&logger);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].message, "query failed");
        assert_eq!(lines[1].message, "at line 3");
        assert_eq!(lines[1].module, "");
    }

    #[test]
    fn test_failed_init_leaves_no_global_logger() {
        // Another subscriber owns the process first
        tracing::subscriber::set_global_default(tracing_subscriber::registry()).unwrap();

        let config = SuperLogConfig {
            max_lines: 7,
            ..SuperLogConfig::default()
        }
        .with_console(false)
        .with_log_directory(None);

        assert!(init_superlog(&config).is_err());
        // Other tests may install a logger, but never this one
        assert!(SuperLog::global().map_or(true, |l| l.panel().max_lines() != 7));
    }
}
