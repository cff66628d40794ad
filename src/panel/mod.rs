//! On-screen log panel
//!
//! A scrolling, resizable overlay that shows the most recent log lines. Log
//! calls may arrive from any thread; drawing and input handling happen on the
//! host's UI thread.
//!
//! The panel keeps two locks apart: the line buffer has its own mutex so a
//! producer is only blocked for the duration of an append, and the interaction
//! state (scroll, drag, width) sits behind a second mutex that only the UI
//! thread touches.

mod colors;
mod input;
mod layout;
mod render;
mod scroll;
mod theme;

pub use colors::{hsb_to_rgb, ModuleColorMap};
pub use layout::{PanelLayout, HANDLE_WIDTH, MIN_WIDTH_PCT, TAB_HEIGHT, TAB_WIDTH};
pub use scroll::ScrollState;
pub use theme::PanelTheme;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use ratatui::prelude::*;

use crate::logging::{LogBuffer, LogLevel, LogLine, DEFAULT_MAX_LINES};

/// Default share of the host width taken by the open panel
pub const DEFAULT_WIDTH_PCT: f32 = 0.85;

/// Interaction and display state, touched only from the UI thread
#[derive(Debug)]
struct PanelState {
    minimized: bool,
    width_pct: f32,
    use_colors: bool,
    theme: PanelTheme,
    module_colors: ModuleColorMap,
    scroll: ScrollState,
    dragging_width: bool,
    /// Area passed to the last draw, used to hit-test input between frames
    last_area: Rect,
    /// Oldest and newest buffer index drawn in the last frame
    visible: Option<(usize, usize)>,
    /// Whether the last frame put the tab or the panel on screen
    drawn: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            minimized: true,
            width_pct: DEFAULT_WIDTH_PCT,
            use_colors: true,
            theme: PanelTheme::default(),
            module_colors: ModuleColorMap::new(),
            scroll: ScrollState::new(),
            dragging_width: false,
            last_area: Rect::default(),
            visible: None,
            drawn: false,
        }
    }
}

impl PanelState {
    fn layout(&self) -> PanelLayout {
        PanelLayout::calculate(self.last_area, self.width_pct)
    }
}

/// Scrollable overlay of recent log lines
pub struct LogPanel {
    buffer: LogBuffer,
    enabled: AtomicBool,
    state: Mutex<PanelState>,
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl LogPanel {
    /// Create a disabled, minimized panel keeping at most `max_lines` lines
    pub fn new(max_lines: usize) -> Self {
        Self {
            buffer: LogBuffer::new(max_lines),
            enabled: AtomicBool::new(false),
            state: Mutex::new(PanelState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, PanelState> {
        // Panel state holds no invariants a panic could break halfway
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a log call; multi-line messages become one line each
    pub fn log(&self, level: LogLevel, module: &str, message: &str) {
        self.buffer.push(level, module, message);
    }

    /// Copy of the lines currently held
    pub fn snapshot(&self) -> Vec<LogLine> {
        self.buffer.snapshot()
    }

    /// The underlying line buffer
    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    pub fn set_max_lines(&self, max_lines: usize) {
        self.buffer.set_max_lines(max_lines);
    }

    pub fn max_lines(&self) -> usize {
        self.buffer.max_lines()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Show or hide the panel body, dropping any scroll motion
    pub fn set_minimized(&self, minimized: bool) {
        let mut state = self.state();
        state.minimized = minimized;
        state.dragging_width = false;
        state.scroll.reset();
    }

    pub fn is_minimized(&self) -> bool {
        self.state().minimized
    }

    /// Color messages by level and modules by name
    pub fn set_use_colors(&self, use_colors: bool) {
        self.state().use_colors = use_colors;
    }

    pub fn use_colors(&self) -> bool {
        self.state().use_colors
    }

    pub fn set_level_color(&self, level: LogLevel, color: Color) {
        self.state().theme.set_level_color(level, color);
    }

    pub fn level_color(&self, level: LogLevel) -> Color {
        self.state().theme.level_color(level)
    }

    /// Share of the host width the open panel covers, clamped to `[0.1, 1.0]`
    pub fn set_width_pct(&self, pct: f32) {
        self.state().width_pct = pct.clamp(MIN_WIDTH_PCT, 1.0);
    }

    pub fn width_pct(&self) -> f32 {
        self.state().width_pct
    }

    /// Color assigned to a module, assigning one if the module is new
    pub fn module_color(&self, module: &str) -> Color {
        self.state().module_colors.color_for(module)
    }

    /// Oldest and newest buffer index drawn in the last frame
    pub fn visible_range(&self) -> Option<(usize, usize)> {
        self.state().visible
    }

    /// Displayed scroll offset in rows (0 = newest line at the bottom)
    pub fn scroll_offset(&self) -> f32 {
        self.state().scroll.current
    }

    /// Scroll offset being eased toward
    pub fn scroll_target(&self) -> f32 {
        self.state().scroll.target
    }

    /// Layout computed from the last drawn area
    pub fn layout(&self) -> PanelLayout {
        self.state().layout()
    }
}
