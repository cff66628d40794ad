//! Pointer and keyboard handling for the log panel
//!
//! Both handlers return `true` when the event was consumed by the panel, so the
//! host can skip its own handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use super::layout::hit;
use super::LogPanel;

/// Rows moved per arrow key
const KEY_SCROLL_ROWS: f32 = 2.0;
/// Rows moved per wheel notch
const WHEEL_SCROLL_ROWS: f32 = 3.0;
/// Width change per `+`/`-` key
const WIDTH_STEP: f32 = 0.05;

impl LogPanel {
    /// Handle a mouse event from the host
    pub fn handle_mouse(&self, mouse: MouseEvent) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let mut state = self.state();
        if !state.drawn {
            return false;
        }
        let layout = state.layout();
        let (column, row) = (mouse.column, mouse.row);

        if state.minimized {
            return match mouse.kind {
                MouseEventKind::Up(MouseButton::Left) if hit(layout.tab, column, row) => {
                    state.minimized = false;
                    state.scroll.reset();
                    true
                }
                MouseEventKind::Down(MouseButton::Left) => hit(layout.tab, column, row),
                _ => false,
            };
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.on_resize_edge(column, row) {
                    state.dragging_width = true;
                    state.width_pct = layout.width_pct_for_column(column);
                    true
                } else if hit(layout.text, column, row) {
                    state.scroll.begin_drag(row as f32);
                    true
                } else {
                    hit(layout.panel, column, row)
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if state.dragging_width {
                    state.width_pct = layout.width_pct_for_column(column);
                    true
                } else if state.scroll.dragging {
                    state.scroll.drag_to(row as f32);
                    true
                } else {
                    false
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let was_dragging = state.dragging_width || state.scroll.dragging;
                state.dragging_width = false;
                state.scroll.end_drag();

                if hit(layout.close, column, row) {
                    state.minimized = true;
                    state.scroll.reset();
                    return true;
                }
                was_dragging || hit(layout.panel, column, row)
            }
            MouseEventKind::ScrollUp if hit(layout.panel, column, row) => {
                state.scroll.nudge(-WHEEL_SCROLL_ROWS);
                true
            }
            MouseEventKind::ScrollDown if hit(layout.panel, column, row) => {
                state.scroll.nudge(WHEEL_SCROLL_ROWS);
                true
            }
            _ => false,
        }
    }

    /// Handle a key press from the host
    ///
    /// Keys are only taken while the panel is open.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        // Only process key press events (not release/repeat)
        if key.kind != KeyEventKind::Press || !self.is_enabled() {
            return false;
        }

        let mut state = self.state();
        if state.minimized || !state.drawn {
            return false;
        }

        let page = state.layout().text.height.max(1) as f32;

        match key.code {
            KeyCode::Up => state.scroll.nudge(-KEY_SCROLL_ROWS),
            KeyCode::Down => state.scroll.nudge(KEY_SCROLL_ROWS),
            KeyCode::PageUp => state.scroll.nudge(-page),
            KeyCode::PageDown => state.scroll.nudge(page),
            KeyCode::Home => state.scroll.to_oldest(),
            KeyCode::End => state.scroll.to_newest(),
            KeyCode::Char('+') => {
                state.width_pct = (state.width_pct + WIDTH_STEP).min(1.0);
            }
            KeyCode::Char('-') => {
                state.width_pct = (state.width_pct - WIDTH_STEP).max(super::MIN_WIDTH_PCT);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::logging::LogLevel;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// An enabled, open panel drawn once into a 100x20 area
    fn open_panel(lines: usize) -> LogPanel {
        let panel = LogPanel::new(1000);
        panel.set_enabled(true);
        panel.set_minimized(false);
        for i in 0..lines {
            panel.log(LogLevel::Notice, "test", &format!("line {}", i));
        }
        draw(&panel);
        panel
    }

    fn draw(panel: &LogPanel) {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| panel.draw(frame, frame.size())).unwrap();
    }

    #[test]
    fn test_disabled_panel_ignores_input() {
        let panel = LogPanel::default();
        assert!(!panel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 99, 19)));
        assert!(!panel.handle_key(key(KeyCode::Up)));
    }

    #[test]
    fn test_click_tab_opens_panel() {
        let panel = LogPanel::new(10);
        panel.set_enabled(true);
        panel.log(LogLevel::Notice, "test", "hello");
        draw(&panel);
        assert!(panel.is_minimized());

        // Clicks elsewhere fall through to the host
        assert!(!panel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5)));

        assert!(panel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 90, 19)));
        assert!(panel.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 90, 19)));
        assert!(!panel.is_minimized());
    }

    #[test]
    fn test_empty_panel_leaves_input_to_host() {
        let panel = LogPanel::new(10);
        panel.set_enabled(true);
        draw(&panel);

        // No tab is on screen, so its corner belongs to the host
        assert!(!panel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 90, 19)));
        assert!(!panel.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 90, 19)));
        assert!(panel.is_minimized());

        panel.set_minimized(false);
        draw(&panel);
        assert!(!panel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 50, 5)));
        assert!(!panel.handle_key(key(KeyCode::Up)));

        // The first line brings the panel back
        panel.log(LogLevel::Notice, "test", "hello");
        draw(&panel);
        assert!(panel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 50, 5)));
    }

    #[test]
    fn test_emptied_buffer_stops_taking_input() {
        let panel = open_panel(5);
        assert!(panel.handle_key(key(KeyCode::Up)));

        panel.set_max_lines(0);
        draw(&panel);
        assert!(!panel.handle_key(key(KeyCode::Up)));
        assert!(!panel.handle_mouse(mouse(MouseEventKind::ScrollUp, 50, 5)));
    }

    #[test]
    fn test_click_close_minimizes() {
        let panel = open_panel(5);
        let close = panel.layout().close;

        panel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), close.x, close.y));
        assert!(panel.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), close.x, close.y)));
        assert!(panel.is_minimized());
    }

    #[test]
    fn test_drag_handle_resizes() {
        let panel = open_panel(5);
        let handle = panel.layout().handle;

        assert!(panel.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            handle.x,
            5
        )));
        assert!(panel.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 50, 6)));
        assert_eq!(panel.width_pct(), 0.5);

        assert!(panel.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 50, 6)));
        // Further drags do nothing once released
        assert!(!panel.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 70, 6)));
        assert_eq!(panel.width_pct(), 0.5);
    }

    #[test]
    fn test_drag_text_scrolls_back() {
        let panel = open_panel(200);
        let text = panel.layout().text;

        assert!(panel.handle_mouse(mouse(
            MouseEventKind::Down(MouseButton::Left),
            text.x + 5,
            2
        )));
        assert!(panel.handle_mouse(mouse(
            MouseEventKind::Drag(MouseButton::Left),
            text.x + 5,
            12
        )));
        assert_eq!(panel.scroll_target(), -10.0);

        panel.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), text.x + 5, 12));
        for _ in 0..30 {
            draw(&panel);
        }
        // Content moved toward older lines and kept coasting after release
        assert!(panel.scroll_offset() < -10.0);
    }

    #[test]
    fn test_wheel_over_panel_scrolls() {
        let panel = open_panel(200);
        let text = panel.layout().text;

        assert!(panel.handle_mouse(mouse(MouseEventKind::ScrollUp, text.x + 1, 3)));
        assert_eq!(panel.scroll_target(), -WHEEL_SCROLL_ROWS);

        // Wheel outside the panel belongs to the host
        assert!(!panel.handle_mouse(mouse(MouseEventKind::ScrollUp, 0, 3)));
    }

    #[test]
    fn test_keys_move_scroll_target() {
        let panel = open_panel(200);

        assert!(panel.handle_key(key(KeyCode::Up)));
        assert_eq!(panel.scroll_target(), -KEY_SCROLL_ROWS);

        assert!(panel.handle_key(key(KeyCode::Home)));
        assert_eq!(panel.scroll_target(), -180.0);

        assert!(panel.handle_key(key(KeyCode::End)));
        assert_eq!(panel.scroll_target(), 0.0);

        assert!(panel.handle_key(key(KeyCode::PageUp)));
        assert_eq!(panel.scroll_target(), -20.0);

        assert!(!panel.handle_key(key(KeyCode::Char('z'))));
    }

    #[test]
    fn test_plus_minus_change_width() {
        let panel = open_panel(1);
        panel.set_width_pct(0.5);

        assert!(panel.handle_key(key(KeyCode::Char('+'))));
        assert!((panel.width_pct() - 0.55).abs() < 1e-6);
        assert!(panel.handle_key(key(KeyCode::Char('-'))));
        assert!(panel.handle_key(key(KeyCode::Char('-'))));
        assert!((panel.width_pct() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_keys_ignored_while_minimized() {
        let panel = open_panel(50);
        panel.set_minimized(true);
        assert!(!panel.handle_key(key(KeyCode::Up)));
    }
}
