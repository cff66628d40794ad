//! Inertial scroll state for the log panel
//!
//! Offsets are measured in rows. `0` pins the newest line to the bottom of the
//! panel, negative offsets move back through history down to `-max_scroll`.

/// Multiplier applied to pointer movement while dragging
pub const DRAG_GAIN: f32 = 1.0;
/// Per-frame decay of the measured drag speed
const DRAG_DECAY: f32 = 0.6;
/// Per-frame decay of free-running inertia
const INERTIA_DECAY: f32 = 0.97;
/// Inertia damping while pulling back an overshoot
const OVERSHOOT_DAMPING: f32 = 0.6;
/// Low-pass filter used to pull an overshoot back into range
const OVERSHOOT_FILTER: f32 = 0.85;
/// Easing of the displayed offset toward the target
const LERP: f32 = 0.33;

/// Scroll position, target and momentum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollState {
    /// Offset currently displayed
    pub current: f32,
    /// Offset being eased toward
    pub target: f32,
    /// Velocity applied to the target once the pointer is released
    pub inertia: f32,
    /// Last measured drag speed
    pub drag_speed: f32,
    /// A pointer drag is in progress
    pub dragging: bool,
    /// Row of the last drag sample
    prev_row: f32,
    /// Furthest the view can scroll back, set each frame
    max_scroll: f32,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all motion and return to the newest line
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Update the scroll range from the line count and visible rows
    pub fn set_bounds(&mut self, total_lines: usize, viewport_rows: usize) {
        self.max_scroll = total_lines.saturating_sub(viewport_rows) as f32;
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    /// Start a pointer drag at `row`
    pub fn begin_drag(&mut self, row: f32) {
        self.dragging = true;
        self.prev_row = row;
        self.inertia = 0.0;
        self.drag_speed = 0.0;
    }

    /// Pointer moved to `row` during a drag
    pub fn drag_to(&mut self, row: f32) {
        if !self.dragging {
            return;
        }
        self.drag_speed = (row - self.prev_row) * DRAG_GAIN;
        self.inertia = -self.drag_speed;
        self.target -= self.drag_speed;
        self.prev_row = row;
    }

    /// Pointer released; keep coasting with the last drag speed
    pub fn end_drag(&mut self) {
        if self.dragging {
            self.inertia = -self.drag_speed;
        }
        self.dragging = false;
    }

    /// Move the target by `rows`, clamped to the valid range
    pub fn nudge(&mut self, rows: f32) {
        self.inertia = 0.0;
        self.target = (self.target + rows).clamp(-self.max_scroll, 0.0);
    }

    /// Jump to the oldest line
    pub fn to_oldest(&mut self) {
        self.inertia = 0.0;
        self.target = -self.max_scroll;
    }

    /// Jump to the newest line
    pub fn to_newest(&mut self) {
        self.inertia = 0.0;
        self.target = 0.0;
    }

    /// Advance one frame
    pub fn step(&mut self) {
        self.drag_speed *= DRAG_DECAY;

        if !self.dragging {
            if self.target < -self.max_scroll {
                self.target =
                    OVERSHOOT_FILTER * self.target - self.max_scroll * (1.0 - OVERSHOOT_FILTER);
                self.inertia *= OVERSHOOT_DAMPING;
            }
            if self.target > 0.0 {
                self.target *= OVERSHOOT_FILTER;
                self.inertia *= OVERSHOOT_DAMPING;
            }

            self.target += self.inertia;
            self.inertia *= INERTIA_DECAY;
        }

        self.current += (self.target - self.current) * LERP;
    }

    /// Number of whole rows scrolled back from the newest line
    pub fn rows_back(&self) -> usize {
        (-self.current).round().clamp(0.0, self.max_scroll) as usize
    }
}
