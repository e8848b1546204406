//! Linear-memory pane rendering: hex dump with an ASCII gutter.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel_block;
use crate::debugger::MEMORY_BYTES_PER_LINE;
use crate::engine::Engine;
use crate::ui::theme::DEFAULT_THEME;

/// One dump line: address, byte pairs, then the printable-ASCII view.
/// Bytes past the end of the memory read as `00` / `.`.
pub(crate) fn memory_hex_line(
    engine: &dyn Engine,
    memo: usize,
    byte_index: usize,
    size: usize,
) -> String {
    let mut hex = format!("0x{:08x} ", byte_index);
    let mut ascii = String::new();
    for i in 0..size {
        if i % 2 == 0 {
            hex.push(' ');
        }
        match engine.memory_byte(memo, byte_index + i) {
            Some(byte) => {
                hex.push_str(&format!("{:02x}", byte));
                if byte.is_ascii_graphic() || byte == b' ' {
                    ascii.push(byte as char);
                } else {
                    ascii.push('.');
                }
            }
            None => {
                hex.push_str("00");
                ascii.push('.');
            }
        }
    }
    hex.push_str("  ");
    hex.push_str(&ascii);
    hex
}

pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    engine: &dyn Engine,
    memo_index: usize,
    memo_byte_start: usize,
    is_focused: bool,
) {
    let title = if engine.memory_count() > 0 {
        format!(" MEMORY #{} ", memo_index)
    } else {
        " MEMORY ".to_string()
    };
    let block = panel_block(title, is_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if engine.memory_count() == 0 {
        let mid = (inner.height / 2) as usize;
        let mut lines = vec![Line::default(); mid];
        lines.push(
            Line::from(Span::styled(
                "No memory found",
                Style::default()
                    .fg(DEFAULT_THEME.comment)
                    .add_modifier(Modifier::ITALIC),
            ))
            .centered(),
        );
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let lines: Vec<Line> = (0..inner.height as usize)
        .map(|i| {
            let start = memo_byte_start + i * MEMORY_BYTES_PER_LINE;
            Line::from(Span::styled(
                memory_hex_line(engine, memo_index, start, MEMORY_BYTES_PER_LINE),
                Style::default().fg(DEFAULT_THEME.fg),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MockEngine;

    #[test]
    fn test_hex_line_layout() {
        let engine = MockEngine::from_listing(".memory 8\n.data 0 0 AB\nnop\n").unwrap();
        let line = memory_hex_line(&engine, 0, 0, 4);
        assert_eq!(line, "0x00000000  4142 0000  AB..");
    }

    #[test]
    fn test_hex_line_past_end_pads_with_zeros() {
        let engine = MockEngine::from_listing(".memory 2\nnop\n").unwrap();
        let line = memory_hex_line(&engine, 0, 0, 4);
        assert_eq!(line, "0x00000000  0000 0000  ....");
    }
}
