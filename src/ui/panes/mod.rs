//! Render functions for the debug view panels.
//!
//! Each panel draws a bordered block (highlighted while focused) and fills
//! the interior through the shared grid renderer in [`crate::ui::grid`].
//! Panels are stateless per call; scroll and highlight state lives in the
//! [`DebugSession`](crate::debugger::DebugSession) that embeds them.

pub mod code;
pub mod command;
pub mod memory;
pub mod stack;

use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

use crate::ui::theme::DEFAULT_THEME;

pub use code::render_code_pane;
pub use command::render_command_pane;
pub use memory::render_memory_pane;
pub use stack::render_stack_pane;

pub(crate) fn panel_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}
