//! Disassembly pane rendering.

use ratatui::{layout::Rect, Frame};

use super::panel_block;
use crate::debugger::DebugSession;
use crate::ui::grid::render_rows;

/// Render the code listing: breakpoint marks, line numbers, instruction
/// text, with the current pc row highlighted and followed while the
/// program is running.
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    session: &mut DebugSession,
    is_focused: bool,
) {
    let block = panel_block(" CODE ".to_string(), is_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    session.refresh_disassembly();
    let lines = session.code_lines();
    render_rows(frame, inner, &lines, &mut session.code_grid);
}
