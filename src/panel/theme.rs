//! Panel colors
//!
//! Semantic color definitions for the log panel. Level colors can be changed at
//! runtime through [`PanelTheme::set_level_color`].

use ratatui::style::{Color, Style};

use crate::logging::LogLevel;

/// Colors used to draw the log panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelTheme {
    /// Message color per level, indexed by [`LogLevel`] order
    level_colors: [Color; 5],
    /// Message color when per-level colors are disabled
    pub text_plain: Color,
    /// Panel background
    pub panel_bg: Color,
    /// Handle bar background
    pub handle_bg: Color,
    /// Handle grip and close button
    pub handle_fg: Color,
    /// Thumb marking the visible part of the buffer
    pub thumb: Color,
    /// Minimized tab background
    pub tab_bg: Color,
    /// Minimized tab text
    pub tab_fg: Color,
}

impl Default for PanelTheme {
    fn default() -> Self {
        Self {
            level_colors: [
                Color::Rgb(127, 127, 127),
                Color::Rgb(59, 129, 238),
                Color::Rgb(248, 248, 6),
                Color::Rgb(238, 0, 0),
                Color::Rgb(248, 0, 220),
            ],
            text_plain: Color::Rgb(200, 200, 200),
            panel_bg: Color::Rgb(0, 0, 0),
            handle_bg: Color::Rgb(44, 44, 44),
            handle_fg: Color::White,
            thumb: Color::Rgb(100, 100, 100),
            tab_bg: Color::Rgb(0, 0, 0),
            tab_fg: Color::White,
        }
    }
}

impl PanelTheme {
    /// Message color for a level
    pub fn level_color(&self, level: LogLevel) -> Color {
        self.level_colors[level as usize]
    }

    /// Override the message color for a level
    pub fn set_level_color(&mut self, level: LogLevel, color: Color) {
        self.level_colors[level as usize] = color;
    }

    pub fn panel_style(&self) -> Style {
        Style::default().bg(self.panel_bg)
    }

    pub fn handle_style(&self) -> Style {
        Style::default().bg(self.handle_bg).fg(self.handle_fg)
    }

    pub fn tab_style(&self) -> Style {
        Style::default().bg(self.tab_bg).fg(self.tab_fg)
    }
}
