//! Log panel rendering
//!
//! Draws either the minimized tab or the open panel: a handle bar on the left
//! edge and the most recent lines stacked upward from the bottom row.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

use super::layout::PanelLayout;
use super::{LogPanel, PanelState};
use crate::logging::LogLine;

/// Separator between the module column and the message
const SEPARATOR: &str = " | ";
/// Label of the minimized tab
const TAB_LABEL: &str = " + [ Log ]";

impl LogPanel {
    /// Draw the panel into `area` and advance its scroll animation by one frame
    ///
    /// The line buffer is copied under its lock first; rendering then runs
    /// without blocking producers.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if !self.is_enabled() {
            self.state().drawn = false;
            return;
        }

        let lines = self.buffer.snapshot();
        let module_width = self.buffer.max_module_len();

        let mut state = self.state();
        state.last_area = area;

        if lines.is_empty() || area.width == 0 || area.height == 0 {
            // Nothing on screen, so nothing for the pointer to grab
            state.visible = None;
            state.drawn = false;
            state.dragging_width = false;
            state.scroll.end_drag();
            return;
        }
        state.drawn = true;

        let layout = state.layout();
        if state.minimized {
            state.visible = None;
            render_tab(frame, &layout, &state);
        } else {
            render_open(frame, &layout, &mut state, &lines, module_width);
        }
    }
}

fn render_tab(frame: &mut Frame, layout: &PanelLayout, state: &PanelState) {
    frame.render_widget(Clear, layout.tab);
    let tab = Paragraph::new(TAB_LABEL).style(state.theme.tab_style());
    frame.render_widget(tab, layout.tab);
}

fn render_open(
    frame: &mut Frame,
    layout: &PanelLayout,
    state: &mut PanelState,
    lines: &[LogLine],
    module_width: usize,
) {
    let rows = layout.text.height as usize;

    state.scroll.set_bounds(lines.len(), rows);
    state.scroll.step();
    let rows_back = state.scroll.rows_back();

    // Newest visible line sits on the bottom row
    let newest = lines.len() - 1 - rows_back.min(lines.len() - 1);
    let oldest = (newest + 1).saturating_sub(rows);
    state.visible = Some((oldest, newest));

    frame.render_widget(Clear, layout.panel);
    frame.render_widget(Block::default().style(state.theme.panel_style()), layout.panel);

    // Keep at least half the text width for messages
    let module_width = module_width.min(layout.text.width as usize / 2);

    let mut text: Vec<Line> = Vec::with_capacity(rows);
    let shown = newest + 1 - oldest;
    text.extend((shown..rows).map(|_| Line::default()));
    for line in &lines[oldest..=newest] {
        text.push(styled_line(state, line, module_width));
    }
    frame.render_widget(Paragraph::new(text), layout.text);

    render_handle(frame, layout, state, lines.len(), oldest, newest);
}

fn styled_line(state: &mut PanelState, line: &LogLine, module_width: usize) -> Line<'static> {
    let module: String = line.module.chars().take(module_width).collect();
    let module = format!("{:>width$}", module, width = module_width);

    let (module_style, message_style) = if state.use_colors {
        let module_color = if line.module.is_empty() {
            state.theme.text_plain
        } else {
            state.module_colors.color_for(&line.module)
        };
        (
            Style::default().fg(module_color),
            Style::default().fg(state.theme.level_color(line.level)),
        )
    } else {
        let plain = Style::default().fg(state.theme.text_plain);
        (plain, plain)
    };

    Line::from(vec![
        Span::styled(module, module_style),
        Span::styled(format!("{}{}", SEPARATOR, line.message), message_style),
    ])
}

fn render_handle(
    frame: &mut Frame,
    layout: &PanelLayout,
    state: &PanelState,
    total: usize,
    oldest: usize,
    newest: usize,
) {
    let handle = layout.handle;
    if handle.width == 0 || handle.height == 0 {
        return;
    }
    let handle_style = state.theme.handle_style();
    frame.render_widget(Block::default().style(handle_style), handle);

    // Thumb spans the part of the buffer that is on screen
    let height = handle.height as usize;
    let top = oldest * height / total;
    let bottom = ((newest + 1) * height + total - 1) / total;
    let bottom = bottom.max(top + 1);
    let thumb = Rect {
        x: handle.x,
        y: handle.y + top as u16,
        width: handle.width,
        height: (bottom - top) as u16,
    };
    frame.render_widget(
        Block::default().style(Style::default().bg(state.theme.thumb)),
        thumb,
    );

    let grip = Rect {
        x: handle.x,
        y: handle.y + handle.height / 2,
        width: handle.width,
        height: 1,
    };
    frame.render_widget(Paragraph::new("||").style(handle_style), grip);

    frame.render_widget(Paragraph::new("x ").style(handle_style), layout.close);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    use crate::logging::LogLevel;
    use crate::panel::PanelTheme;

    fn render(panel: &LogPanel, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| panel.draw(frame, frame.size()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &Buffer, row: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.get(x, row).symbol())
            .collect()
    }

    #[test]
    fn test_disabled_panel_draws_nothing() {
        let panel = LogPanel::new(10);
        panel.log(LogLevel::Notice, "app", "hidden");
        let buffer = render(&panel, 40, 5);
        assert!(row_text(&buffer, 4).trim().is_empty());
    }

    #[test]
    fn test_minimized_tab() {
        let panel = LogPanel::new(10);
        panel.set_enabled(true);
        panel.log(LogLevel::Notice, "app", "hello");

        let buffer = render(&panel, 40, 5);
        assert!(row_text(&buffer, 4).contains("+ [ Log ]"));
        assert_eq!(panel.visible_range(), None);
    }

    #[test]
    fn test_open_panel_draws_newest_at_bottom() {
        let panel = LogPanel::new(10);
        panel.set_enabled(true);
        panel.set_minimized(false);
        panel.set_width_pct(1.0);
        panel.log(LogLevel::Notice, "app", "first");
        panel.log(LogLevel::Warning, "net", "second");

        let buffer = render(&panel, 40, 5);
        assert!(row_text(&buffer, 3).contains("app | first"));
        assert!(row_text(&buffer, 4).contains("net | second"));
        assert_eq!(panel.visible_range(), Some((0, 1)));
    }

    #[test]
    fn test_open_panel_clips_to_visible_rows() {
        let panel = LogPanel::new(100);
        panel.set_enabled(true);
        panel.set_minimized(false);
        for i in 0..50 {
            panel.log(LogLevel::Notice, "app", &format!("line {}", i));
        }

        let buffer = render(&panel, 60, 10);
        assert!(row_text(&buffer, 9).contains("line 49"));
        assert!(row_text(&buffer, 0).contains("line 40"));
        assert_eq!(panel.visible_range(), Some((40, 49)));
    }

    #[test]
    fn test_multiline_message_shows_module_once() {
        let panel = LogPanel::new(10);
        panel.set_enabled(true);
        panel.set_minimized(false);
        panel.set_width_pct(1.0);
        panel.log(LogLevel::Error, "db", "connection lost\nretrying");

        let buffer = render(&panel, 40, 4);
        assert!(row_text(&buffer, 2).contains("db | connection lost"));
        let last = row_text(&buffer, 3);
        assert!(last.contains("   | retrying"));
        assert!(!last.contains("db"));
    }

    #[test]
    fn test_colors_follow_level_and_module() {
        let panel = LogPanel::new(10);
        panel.set_enabled(true);
        panel.set_minimized(false);
        panel.set_width_pct(1.0);
        panel.set_level_color(LogLevel::Warning, Color::Cyan);
        panel.log(LogLevel::Warning, "net", "slow");

        let buffer = render(&panel, 30, 2);
        let text = row_text(&buffer, 1);
        let bar = text.find(" | ").unwrap() as u16 + 1;
        assert_eq!(buffer.get(bar, 1).fg, Color::Cyan);

        let module_x = text.find("net").unwrap() as u16;
        assert_eq!(buffer.get(module_x, 1).fg, panel.module_color("net"));
    }

    #[test]
    fn test_colors_disabled_uses_plain_text() {
        let panel = LogPanel::new(10);
        panel.set_enabled(true);
        panel.set_minimized(false);
        panel.set_width_pct(1.0);
        panel.set_use_colors(false);
        panel.log(LogLevel::Error, "net", "down");

        let buffer = render(&panel, 30, 2);
        let text = row_text(&buffer, 1);
        let bar = text.find(" | ").unwrap() as u16 + 1;
        assert_eq!(buffer.get(bar, 1).fg, PanelTheme::default().text_plain);
    }
}
