//! Main event loop
//!
//! Polls terminal events and redraws at a fixed rate so the scene and the
//! panel's scroll inertia keep animating.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use super::App;

/// ~60fps for smooth scrolling
const TICK_RATE: Duration = Duration::from_millis(16);

/// Run the main event loop
pub async fn run(app: &mut App) -> Result<()> {
    loop {
        app.render()?;

        // Poll without blocking the runtime so background tasks keep logging
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::time::sleep(TICK_RATE).await;
    }
}
