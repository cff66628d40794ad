//! Demo application
//!
//! A small terminal app hosting the log panel: it draws an animated scene,
//! overlays the panel, and routes input to the panel before handling it itself.

mod event_loop;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use crate::logging::{LogLevel, SuperLog};
use crate::tui::scene::render_scene;
use crate::tui::Tui;

/// Interval between background heartbeat logs
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(2);

/// Main application struct
pub struct App {
    /// Terminal UI
    tui: Tui,
    /// Logger whose panel is drawn over the scene
    logger: Arc<SuperLog>,
    /// Start time, drives the scene animation
    started: Instant,
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(logger: Arc<SuperLog>) -> Result<Self> {
        Ok(Self {
            tui: Tui::new()?,
            logger,
            started: Instant::now(),
            should_quit: false,
        })
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        let heartbeat = tokio::spawn(heartbeat(HEARTBEAT_INTERVAL));

        let result = event_loop::run(self).await;

        heartbeat.abort();

        // Exit TUI mode (also done in Drop, but explicit is clearer)
        self.tui.exit()?;

        result
    }

    fn render(&mut self) -> Result<()> {
        let elapsed = self.started.elapsed().as_millis();
        let logger = Arc::clone(&self.logger);
        self.tui.draw(|frame| {
            let area = frame.size();
            render_scene(frame, area, elapsed);
            logger.draw(frame, area);
        })
    }

    /// Handle a key the panel did not take
    fn handle_key(&mut self, key: KeyEvent) {
        if self.logger.panel().handle_key(key) {
            return;
        }
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('l') => {
                let enabled = !self.logger.is_screen_logging_enabled();
                self.logger.set_screen_logging_enabled(enabled);
            }
            KeyCode::Char('m') => {
                let minimized = self.logger.panel().is_minimized();
                self.logger.set_maximized(minimized);
            }
            KeyCode::Char('c') => {
                let use_colors = !self.logger.panel().use_colors();
                self.logger.set_use_screen_colors(use_colors);
            }
            KeyCode::Char('n') => tracing::info!("Notice from the keyboard"),
            KeyCode::Char('w') => tracing::warn!(target: "demo::keys", "A warning"),
            KeyCode::Char('e') => {
                tracing::error!(target: "demo::keys", "An error\nspanning\nthree lines")
            }
            KeyCode::Char('f') => self.logger.log_fmt(
                LogLevel::Fatal,
                crate::superlog_module!(self),
                format_args!("fatal at frame time {}ms", self.started.elapsed().as_millis()),
            ),
            _ => {}
        }
    }

    /// Handle a mouse event the panel did not take
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.logger.panel().handle_mouse(mouse) {
            return;
        }
        if let MouseEventKind::Drag(_) = mouse.kind {
            tracing::info!("Mouse dragged: {}, {}", mouse.column, mouse.row);
        }
    }
}

/// Log from a background task so the panel shows cross-thread traffic
async fn heartbeat(interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    let mut beats: u64 = 0;
    loop {
        ticker.tick().await;
        beats += 1;
        tracing::debug!(target: "demo::heartbeat", beats, "tick");
    }
}

/// Lines shown when the demo starts
pub fn intro_lines() -> &'static [&'static str] {
    &[
        "This is logging to your screen and",
        "to a timestamped file in logs/.",
        "",
        "Choose where to log to in",
        "~/.superlog/config.toml.",
        "",
        "Minimize the panel with the little x,",
        "or make it wider by dragging the left bar.",
        "Scroll by dragging the text, the wheel or the arrow keys.",
        "",
        "Keys: l toggle panel | m open/close | c colors",
        "      n/w/e/f log a notice/warning/error/fatal | q quit",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intro_mentions_controls() {
        let lines = intro_lines();
        assert!(lines.iter().any(|l| l.contains("q quit")));
        assert!(lines.iter().any(|l| l.is_empty()));
    }
}
