//! superlog - fan out log calls to a file, the console and an on-screen panel
//!
//! The [`logging::SuperLog`] router sends every log call to up to three sinks:
//! a timestamped file, the console, and a [`panel::LogPanel`] that a ratatui
//! host draws each frame and feeds mouse and key events to.

pub mod app;
pub mod config;
pub mod logging;
pub mod panel;
pub mod tui;

pub use config::SuperLogConfig;
pub use logging::{init_superlog, LogLevel, SuperLog};
pub use panel::LogPanel;
