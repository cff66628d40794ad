//! Panel geometry
//!
//! Pre-calculates where the panel, its handle bar and the minimized tab sit
//! inside the host area, so rendering and hit-testing agree on the same rects.

use ratatui::prelude::*;

/// Width of the drag handle on the panel's left edge
pub const HANDLE_WIDTH: u16 = 2;
/// Size of the minimized tab in the bottom-right corner
pub const TAB_WIDTH: u16 = 15;
pub const TAB_HEIGHT: u16 = 1;
/// Smallest panel width as a fraction of the host area, also used when resizing
pub const MIN_WIDTH_PCT: f32 = 0.1;

/// Pre-calculated panel areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    /// Host area the panel lives in
    pub area: Rect,
    /// Whole panel, handle included
    pub panel: Rect,
    /// Drag handle on the left edge
    pub handle: Rect,
    /// Text region right of the handle
    pub text: Rect,
    /// Close button on the bottom row of the handle
    pub close: Rect,
    /// Tab shown while minimized
    pub tab: Rect,
}

/// Whether a cell lies inside `rect`
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

impl PanelLayout {
    pub fn calculate(area: Rect, width_pct: f32) -> Self {
        let right = area.x + area.width;
        let bottom = area.y + area.height;

        let width = ((area.width as f32) * width_pct.clamp(MIN_WIDTH_PCT, 1.0)).round() as u16;
        let width = width.clamp(HANDLE_WIDTH.min(area.width), area.width);

        let panel = Rect {
            x: right - width,
            y: area.y,
            width,
            height: area.height,
        };

        let handle = Rect {
            x: panel.x,
            y: panel.y,
            width: HANDLE_WIDTH.min(panel.width),
            height: panel.height,
        };

        let text = Rect {
            x: panel.x + handle.width,
            y: panel.y,
            width: panel.width - handle.width,
            height: panel.height,
        };

        let close = Rect {
            x: handle.x,
            y: bottom.saturating_sub(1).max(area.y),
            width: handle.width,
            height: area.height.min(1),
        };

        let tab_width = TAB_WIDTH.min(area.width);
        let tab_height = TAB_HEIGHT.min(area.height);
        let tab = Rect {
            x: right - tab_width,
            y: bottom - tab_height,
            width: tab_width,
            height: tab_height,
        };

        Self {
            area,
            panel,
            handle,
            text,
            close,
            tab,
        }
    }

    /// Whether a press at `column` lands on the resize edge
    ///
    /// The edge extends one column to the left of the handle so a thin handle
    /// is easy to grab.
    pub fn on_resize_edge(&self, column: u16, row: u16) -> bool {
        hit(self.area, column, row)
            && column.saturating_add(1) >= self.handle.x
            && column < self.handle.x.saturating_add(self.handle.width)
            && !hit(self.close, column, row)
    }

    /// Panel width fraction for a resize drag ending at `column`
    pub fn width_pct_for_column(&self, column: u16) -> f32 {
        if self.area.width == 0 {
            return MIN_WIDTH_PCT;
        }
        let right = self.area.x + self.area.width;
        let min_cols = (self.area.width / 10)
            .max(HANDLE_WIDTH + 1)
            .min(self.area.width);
        let max_cols = self.area.width.saturating_sub(1).max(min_cols);
        let cols = right.saturating_sub(column).clamp(min_cols, max_cols);
        cols as f32 / self.area.width as f32
    }
}
