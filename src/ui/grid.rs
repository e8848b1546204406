//! Scrollable grid renderer shared by every panel.
//!
//! A grid renders tabular data (rows of attributes, with an optional header)
//! into a rectangle, persisting only scroll and highlight indices between
//! calls. Every call re-derives a valid view from scratch: offsets are
//! clamped against the *current* data size, then follow-scroll pulls the
//! window onto the highlight. The derivation is idempotent, so repeated
//! renders with unchanged inputs never oscillate.
//!
//! Inconsistent shapes (no attributes, header/attribute mismatch, empty
//! data) are rendered as a centered inline message, never a fault.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::DEFAULT_THEME;

pub const MSG_NO_ATTRIBUTES: &str = "Error displaying data: No attributes to show";
pub const MSG_HEADER_CONFLICT: &str = "Error displaying data: Header size conflict";
pub const MSG_NO_DATA: &str = "No data to display";

/// Highlight modes. `Cell` takes precedence over the band modes when the
/// highlighted line and column are both in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Row,
    Column,
    RowAndColumn,
    Cell,
}

/// Scroll/highlight state persisted by the panel that embeds the grid.
///
/// Scroll offsets saturate at zero and may temporarily run past the end
/// between renders; `usize::MAX` is the conventional "stick to bottom"
/// sentinel. Highlight indices are `-1` exactly when the corresponding
/// dimension is empty.
#[derive(Debug, Clone)]
pub struct GridState {
    pub top_index: usize,
    pub left_index: usize,
    pub highlight_line: isize,
    pub highlight_col: isize,
    pub highlight: Highlight,
    pub follow_scroll: bool,
}

impl GridState {
    pub fn new(highlight: Highlight, follow_scroll: bool) -> Self {
        GridState {
            top_index: 0,
            left_index: 0,
            highlight_line: 0,
            highlight_col: 0,
            highlight,
            follow_scroll,
        }
    }

    pub fn reset_scroll(&mut self) {
        self.top_index = 0;
        self.left_index = 0;
    }

    /// Clamp the horizontal offset and highlight into range for the current
    /// attribute count, then follow the highlighted column if enabled.
    /// Both counts must be non-zero; the caller reports that case instead.
    pub fn reconcile_horizontal(&mut self, attribute_count: usize, visible_attributes: usize) {
        self.left_index = self
            .left_index
            .min(attribute_count.saturating_sub(visible_attributes));
        self.highlight_col = self.highlight_col.clamp(0, attribute_count as isize - 1);
        if self.follow_scroll && visible_attributes > 0 {
            let col = self.highlight_col as usize;
            if self.left_index > col {
                self.left_index = col;
            } else if self.left_index + visible_attributes <= col {
                self.left_index = col + 1 - visible_attributes;
            }
        }
    }

    /// Vertical counterpart of [`reconcile_horizontal`]. An empty data set
    /// forces both highlight indices to `-1`.
    ///
    /// [`reconcile_horizontal`]: GridState::reconcile_horizontal
    pub fn reconcile_vertical(&mut self, row_count: usize, visible_lines: usize) {
        self.top_index = self.top_index.min(row_count.saturating_sub(visible_lines));
        if row_count == 0 {
            self.highlight_line = -1;
            self.highlight_col = -1;
            return;
        }
        self.highlight_line = self.highlight_line.clamp(0, row_count as isize - 1);
        if self.follow_scroll && visible_lines > 0 {
            let line = self.highlight_line as usize;
            if self.top_index > line {
                self.top_index = line;
            } else if self.top_index + visible_lines <= line {
                self.top_index = line + 1 - visible_lines;
            }
        }
    }

    /// Full clamp-then-follow pass for a headerless grid.
    pub fn reconcile(
        &mut self,
        row_count: usize,
        visible_lines: usize,
        attribute_count: usize,
        visible_attributes: usize,
    ) {
        if attribute_count > 0 && visible_attributes > 0 {
            self.reconcile_horizontal(attribute_count, visible_attributes);
        }
        self.reconcile_vertical(row_count, visible_lines);
    }
}

fn pad_cell(text: &str, width: usize) -> String {
    let mut cell: String = text.chars().take(width).collect();
    while cell.chars().count() < width {
        cell.push(' ');
    }
    cell
}

fn render_centered(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let mid = (area.height / 2) as usize;
    let mut lines = vec![Line::default(); mid];
    lines.push(Line::from(Span::styled(message.to_string(), style)).centered());
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render `data` into `area`, updating `state` in place.
///
/// `attribute_count` is the logical column count of the data;
/// `visible_attributes` how many of them share the width of `area`. Each
/// visible attribute gets `area.width / visible_attributes` columns, the
/// integer-division remainder staying blank.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    header: Option<&[String]>,
    data: &[Vec<String>],
    attribute_count: usize,
    visible_attributes: usize,
    state: &mut GridState,
) {
    if attribute_count == 0 || visible_attributes == 0 {
        let style = Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD);
        render_centered(frame, area, MSG_NO_ATTRIBUTES, style);
        return;
    }
    let header = header.unwrap_or_default();
    if !header.is_empty() && header.len() != attribute_count {
        let style = Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD);
        render_centered(frame, area, MSG_HEADER_CONFLICT, style);
        return;
    }

    state.reconcile_horizontal(attribute_count, visible_attributes);
    let cell_width = (area.width as usize) / visible_attributes;

    let mut lines: Vec<Line> = Vec::new();
    let mut body_lines = area.height as usize;
    if !header.is_empty() {
        let header_style = Style::default()
            .fg(DEFAULT_THEME.fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let mut spans = Vec::new();
        for j in 0..visible_attributes {
            let col = state.left_index + j;
            if col >= header.len() {
                break;
            }
            spans.push(Span::styled(pad_cell(&header[col], cell_width), header_style));
        }
        lines.push(Line::from(spans));
        body_lines = body_lines.saturating_sub(1);
    }

    state.reconcile_vertical(data.len(), body_lines);

    if data.is_empty() {
        let style = Style::default()
            .fg(DEFAULT_THEME.comment)
            .add_modifier(Modifier::ITALIC);
        // The header row still renders above the placeholder.
        if lines.is_empty() {
            render_centered(frame, area, MSG_NO_DATA, style);
        } else {
            frame.render_widget(Paragraph::new(lines), area);
            let body = Rect {
                y: area.y + 1,
                height: area.height.saturating_sub(1),
                ..area
            };
            render_centered(frame, body, MSG_NO_DATA, style);
        }
        return;
    }

    for i in 0..body_lines {
        let r = state.top_index + i;
        let Some(row) = data.get(r) else { break };

        let row_band = matches!(state.highlight, Highlight::Row | Highlight::RowAndColumn)
            && r as isize == state.highlight_line;

        let mut spans = Vec::new();
        let mut used_width = 0usize;
        for j in 0..visible_attributes {
            let c = state.left_index + j;
            let Some(cell) = row.get(c) else { break };

            let col_band = matches!(state.highlight, Highlight::Column | Highlight::RowAndColumn)
                && c as isize == state.highlight_col;
            let cell_hit = state.highlight == Highlight::Cell
                && r as isize == state.highlight_line
                && c as isize == state.highlight_col;

            let mut style = Style::default().fg(DEFAULT_THEME.fg);
            if cell_hit || row_band || col_band {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(pad_cell(cell, cell_width), style));
            used_width += cell_width;
        }
        // A row band covers the full grid width, not just occupied cells.
        let remainder = (area.width as usize).saturating_sub(used_width);
        if remainder > 0 && row_band {
            spans.push(Span::styled(
                " ".repeat(remainder),
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Single-column convenience wrapper for plain line lists.
pub fn render_rows(frame: &mut Frame, area: Rect, rows: &[String], state: &mut GridState) {
    let data: Vec<Vec<String>> = rows.iter().map(|row| vec![row.clone()]).collect();
    render_grid(frame, area, None, &data, 1, 1, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = *buffer.area();
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_follow_scroll_pulls_window_down() {
        let mut state = GridState::new(Highlight::Row, true);
        state.top_index = 50;
        state.highlight_line = 3;
        state.reconcile(100, 10, 1, 1);
        assert_eq!(state.top_index, 3);
    }

    #[test]
    fn test_follow_scroll_pushes_window_up() {
        let mut state = GridState::new(Highlight::Row, true);
        state.top_index = 0;
        state.highlight_line = 25;
        state.reconcile(100, 10, 1, 1);
        assert_eq!(state.top_index, 16);
        assert!(state.top_index <= 25);
        assert!(25 < state.top_index + 10);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut state = GridState::new(Highlight::Cell, true);
        state.top_index = 7777;
        state.left_index = 12;
        state.highlight_line = 42;
        state.highlight_col = 3;
        state.reconcile(50, 8, 6, 2);
        let once = state.clone();
        state.reconcile(50, 8, 6, 2);
        assert_eq!(state.top_index, once.top_index);
        assert_eq!(state.left_index, once.left_index);
        assert_eq!(state.highlight_line, once.highlight_line);
        assert_eq!(state.highlight_col, once.highlight_col);
    }

    #[test]
    fn test_shrinking_data_reclamps() {
        let mut state = GridState::new(Highlight::None, false);
        state.top_index = 90;
        state.highlight_line = 95;
        state.reconcile(100, 10, 1, 1);
        assert_eq!(state.top_index, 90);
        // Data shrank between renders.
        state.reconcile(20, 10, 1, 1);
        assert_eq!(state.top_index, 10);
        assert_eq!(state.highlight_line, 19);
    }

    #[test]
    fn test_empty_data_forces_sentinel_highlights() {
        let mut state = GridState::new(Highlight::RowAndColumn, true);
        state.highlight_line = 5;
        state.highlight_col = 2;
        state.reconcile(0, 10, 4, 4);
        assert_eq!(state.highlight_line, -1);
        assert_eq!(state.highlight_col, -1);
        assert_eq!(state.top_index, 0);
    }

    #[test]
    fn test_stick_to_bottom_sentinel() {
        let mut state = GridState::new(Highlight::None, false);
        state.top_index = usize::MAX;
        state.reconcile(30, 10, 1, 1);
        assert_eq!(state.top_index, 20);
    }

    #[test]
    fn test_zero_attributes_renders_placeholder() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = GridState::new(Highlight::None, false);
        let data = vec![vec!["a".to_string()]];
        terminal
            .draw(|f| {
                let area = f.area();
                render_grid(f, area, None, &data, 0, 0, &mut state);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("No attributes to show"));
    }

    #[test]
    fn test_header_conflict_renders_placeholder() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = GridState::new(Highlight::None, false);
        let header = vec!["a".to_string(), "b".to_string()];
        let data = vec![vec!["1".to_string(), "2".to_string(), "3".to_string()]];
        terminal
            .draw(|f| {
                let area = f.area();
                render_grid(f, area, Some(header.as_slice()), &data, 3, 3, &mut state);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Header size conflict"));
    }

    #[test]
    fn test_empty_data_renders_placeholder() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = GridState::new(Highlight::Row, true);
        terminal
            .draw(|f| {
                let area = f.area();
                render_grid(f, area, None, &[], 1, 1, &mut state);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains(MSG_NO_DATA));
        assert_eq!(state.highlight_line, -1);
    }

    #[test]
    fn test_empty_data_keeps_header_row() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = GridState::new(Highlight::Column, true);
        let header = vec!["2".to_string(), "1".to_string()];
        terminal
            .draw(|f| {
                let area = f.area();
                render_grid(f, area, Some(header.as_slice()), &[], 2, 2, &mut state);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        let mut rows = text.lines();
        assert!(rows.next().unwrap().contains('2'));
        assert!(text.contains(MSG_NO_DATA));
    }

    #[test]
    fn test_visible_slice_contents() {
        let backend = TestBackend::new(20, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = GridState::new(Highlight::None, false);
        state.top_index = 2;
        let rows: Vec<String> = (0..10).map(|i| format!("row{}", i)).collect();
        terminal
            .draw(|f| {
                let area = f.area();
                render_rows(f, area, &rows, &mut state);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("row2"));
        assert!(text.contains("row4"));
        assert!(!text.contains("row5"));
    }
}
