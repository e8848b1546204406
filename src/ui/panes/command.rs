//! Console pane: output log above, prompt line with cursor at the bottom.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel_block;
use crate::debugger::ConsoleSession;
use crate::ui::grid::{render_rows, GridState, Highlight};
use crate::ui::theme::DEFAULT_THEME;

pub fn render_command_pane(
    frame: &mut Frame,
    area: Rect,
    console: &mut ConsoleSession,
    is_focused: bool,
) {
    let block = panel_block(" CMD ".to_string(), is_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    // Output log fills everything but the prompt line and one separator.
    let log_area = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    let mut log_grid = GridState::new(Highlight::None, false);
    log_grid.top_index = console.output_scroll();
    render_rows(frame, log_area, console.output(), &mut log_grid);
    // Persist the clamped offset so scroll keys step from the visible
    // position rather than the sentinel.
    console.set_output_scroll(log_grid.top_index);

    let prompt_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    let prompt_style = Style::default()
        .fg(DEFAULT_THEME.command)
        .add_modifier(Modifier::BOLD);
    let buffer = console.active_line();
    let cursor = console.cursor().min(buffer.len());
    let (before, rest) = buffer.split_at(cursor);
    let (at_cursor, after) = if rest.is_empty() {
        (" ", "")
    } else {
        rest.split_at(1)
    };
    let line = Line::from(vec![
        Span::styled("> ", prompt_style),
        Span::styled(before.to_string(), prompt_style),
        Span::styled(
            at_cursor.to_string(),
            prompt_style.add_modifier(Modifier::REVERSED),
        ),
        Span::styled(after.to_string(), prompt_style),
    ]);
    frame.render_widget(Paragraph::new(line), prompt_area);
}
