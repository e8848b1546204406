//! Value-stack pane rendering.
//!
//! Stack entries are drawn as table columns, top of the stack leftmost.
//! Each 128-bit slot is split into four 4-byte rows, most significant row
//! first, so a full `v128` is visible at a glance. The header labels each
//! column with its 1-based depth counted from the bottom. Left/right keys
//! move a column highlight that the grid keeps in view.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel_block;
use crate::engine::Engine;
use crate::ui::grid::{render_grid, GridState};
use crate::ui::theme::DEFAULT_THEME;

/// Character columns per stack value: ` hhhh hhhh` plus one spare.
const VALUE_COLUMNS: usize = 11;

/// Rows per value: 16 bytes shown 4 bytes at a time.
const VALUE_ROWS: usize = 4;

pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    engine: &dyn Engine,
    grid: &mut GridState,
    is_focused: bool,
) {
    let block = panel_block(" (top) - STACK - (bottom) ".to_string(), is_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let depth = engine.stack_depth();
    if depth == 0 {
        let mid = (inner.height / 2) as usize;
        let mut lines = vec![Line::default(); mid];
        lines.push(
            Line::from(Span::styled(
                "Stack is empty",
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::ITALIC),
            ))
            .centered(),
        );
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let mut header = Vec::with_capacity(depth);
    let mut data = vec![Vec::with_capacity(depth); VALUE_ROWS];
    for i in 0..depth {
        header.push((depth - i).to_string());
        let value = engine.stack_value(i).unwrap_or_default();
        let bytes = value.0;
        for group in 0..VALUE_ROWS {
            // Most significant 4-byte group on the top row.
            data[VALUE_ROWS - 1 - group].push(format!(
                " {:02x}{:02x} {:02x}{:02x}",
                bytes[group * 4 + 3],
                bytes[group * 4 + 2],
                bytes[group * 4 + 1],
                bytes[group * 4]
            ));
        }
    }

    let visible_values = inner.width as usize / VALUE_COLUMNS;
    // The viewport is column-oriented: the row highlight and vertical
    // scroll restart from the top every call.
    grid.top_index = 0;
    grid.highlight_line = 0;
    render_grid(
        frame,
        inner,
        Some(header.as_slice()),
        &data,
        depth,
        visible_values,
        grid,
    );
}
