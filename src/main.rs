use anyhow::Result;

use superlog::app::{self, App};
use superlog::config::SuperLogConfig;
use superlog::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let config = SuperLogConfig::load()?
        // The console shares the terminal with the TUI, so keep it quiet here
        .with_console(false);

    // Initialize logging BEFORE any tracing calls
    let logger = logging::init_superlog(&config)?;

    for line in app::intro_lines() {
        tracing::info!(target: "demo", "{}", line);
    }
    if let Some(path) = logger.current_log_file() {
        tracing::info!("Logging to: {}", path.display());
    }
    logger.set_maximized(true);

    let mut app = App::new(logger)?;
    app.run().await
}
