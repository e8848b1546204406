//! Application state and keyboard event loop.
//!
//! The app owns a side menu and a closed set of main views (home, the
//! read-only module listing, and the debug view).
//! Inside the debug view, a [`Panel`] focus cycles over the four debug
//! panels; every processed input event is followed by a full redraw of
//! everything on screen. The loop is single-threaded and blocks on the
//! next input event; engine calls run synchronously inside it.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

use crate::debugger::{CursorMove, DebugSession, MEMORY_BYTES_PER_LINE};
use crate::ui::grid::{render_rows, GridState, Highlight};
use crate::ui::panes;
use crate::ui::theme::DEFAULT_THEME;

const SIDE_MENU_COLS: u16 = 20;
const MENU_ITEMS: [&str; 4] = ["Home", "Listing", "Debug", "Exit"];
const ENGINE_ERROR_TEXT: &str = "Error creating an engine, please verify the module file is valid";
const KEY_HINTS: &str =
    "<TAB>Focus <F1>Console-Up <F2>Console-Down <PAGE-UP>Prev-Memo <PAGE-DOWN>Next-Memo";

/// Which debug panel receives directional and editing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Stack,
    Code,
    Memory,
    Command,
}

impl Panel {
    /// Cycle focus: stack -> code -> memory -> command -> stack.
    pub fn next(self) -> Self {
        match self {
            Panel::Stack => Panel::Code,
            Panel::Code => Panel::Memory,
            Panel::Memory => Panel::Command,
            Panel::Command => Panel::Stack,
        }
    }
}

/// The main views selectable from the side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Home,
    Listing,
    Debug,
}

pub struct App {
    session: DebugSession,
    view: View,
    menu_focused: bool,
    menu_grid: GridState,
    listing_grid: GridState,
    focused_panel: Panel,
    should_quit: bool,
}

impl App {
    pub fn new(session: DebugSession) -> Self {
        App {
            session,
            view: View::Home,
            menu_focused: true,
            menu_grid: GridState::new(Highlight::Row, true),
            listing_grid: GridState::new(Highlight::Row, true),
            focused_panel: Panel::Command,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &DebugSession {
        &self.session
    }

    /// Run the event loop until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDE_MENU_COLS), Constraint::Min(0)])
            .split(frame.area());

        self.render_menu(frame, columns[0]);
        match self.view {
            View::Home => self.render_home(frame, columns[1]),
            View::Listing => self.render_listing(frame, columns[1]),
            View::Debug => self.render_debug(frame, columns[1]),
        }
    }

    fn render_menu(&mut self, frame: &mut Frame, area: Rect) {
        let block = panes::panel_block(" MENU ".to_string(), self.menu_focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let items: Vec<String> = MENU_ITEMS.iter().map(|item| item.to_string()).collect();
        render_rows(frame, inner, &items, &mut self.menu_grid);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let block = panes::panel_block(" HOME ".to_string(), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let lines = vec![
            Line::from("stacktty - debug a stack machine on the terminal"),
            Line::from(""),
            Line::from("Select 'Debug' from the menu to open the debugging console."),
            Line::from("Inside the debug view, <TAB> cycles panel focus and the"),
            Line::from("command panel accepts typed commands; try 'help' first."),
            Line::from(""),
            Line::from("<ESC> leaves a view; 'Exit' quits."),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(DEFAULT_THEME.fg)),
            inner,
        );
    }

    /// Full-module instruction listing, read-only, with a line highlight
    /// the arrow keys move through the text.
    fn render_listing(&mut self, frame: &mut Frame, area: Rect) {
        let block = panes::panel_block(" LISTING ".to_string(), !self.menu_focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.session.refresh_disassembly();
        let lines: Vec<String> = self
            .session
            .line_table()
            .instructions()
            .iter()
            .map(|instruction| instruction.text.clone())
            .collect();
        render_rows(frame, inner, &lines, &mut self.listing_grid);
    }

    fn render_debug(&mut self, frame: &mut Frame, area: Rect) {
        if !self.session.has_engine() {
            self.render_engine_error(frame, area);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(40),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let focus = |panel| !self.menu_focused && self.focused_panel == panel;
        let (stack_focus, code_focus, memory_focus, command_focus) = (
            focus(Panel::Stack),
            focus(Panel::Code),
            focus(Panel::Memory),
            focus(Panel::Command),
        );

        if let Some((engine, grid)) = self.session.engine_with_stack_grid() {
            panes::render_stack_pane(frame, rows[0], engine, grid, stack_focus);
        }
        panes::render_code_pane(frame, middle[0], &mut self.session, code_focus);
        let (memo_index, memo_byte_start) =
            (self.session.memo_index, self.session.memo_byte_start);
        if let Some(engine) = self.session.engine() {
            panes::render_memory_pane(
                frame,
                middle[1],
                engine,
                memo_index,
                memo_byte_start,
                memory_focus,
            );
        }
        panes::render_command_pane(frame, rows[2], &mut self.session.console, command_focus);

        frame.render_widget(
            Paragraph::new(KEY_HINTS).style(
                Style::default()
                    .fg(DEFAULT_THEME.info)
                    .add_modifier(Modifier::BOLD),
            ),
            rows[3],
        );
    }

    /// Blocking dialog shown while the view has no working engine. The
    /// menu and quit keys stay responsive; the panels do not.
    fn render_engine_error(&self, frame: &mut Frame, area: Rect) {
        let width = (ENGINE_ERROR_TEXT.len() as u16 + 4).min(area.width);
        let height = area.height.min(3);
        let dialog = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };
        let block = Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DEFAULT_THEME.error));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);
        frame.render_widget(
            Paragraph::new(ENGINE_ERROR_TEXT).style(
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ),
            inner,
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.menu_focused {
            self.handle_menu_key(key);
        } else {
            match self.view {
                View::Listing => self.handle_listing_key(key),
                _ => self.handle_debug_key(key),
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up => self.menu_grid.highlight_line -= 1,
            KeyCode::Down => self.menu_grid.highlight_line += 1,
            KeyCode::Enter => match self.menu_grid.highlight_line {
                0 => self.view = View::Home,
                1 => {
                    self.view = View::Listing;
                    self.menu_focused = false;
                }
                2 => {
                    self.view = View::Debug;
                    self.menu_focused = false;
                }
                _ => self.should_quit = true,
            },
            _ => {}
        }
    }

    fn handle_listing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.menu_focused = true;
            }
            KeyCode::Up => self.listing_grid.highlight_line -= 1,
            KeyCode::Down => self.listing_grid.highlight_line += 1,
            _ => {}
        }
    }

    fn handle_debug_key(&mut self, key: KeyEvent) {
        // Back to the menu. 'q' only counts outside the line editor.
        let quit_key = key.code == KeyCode::Esc
            || (self.focused_panel != Panel::Command
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')));
        if quit_key {
            self.menu_focused = true;
            return;
        }
        if !self.session.has_engine() {
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focused_panel = self.focused_panel.next();
                return;
            }
            KeyCode::F(1) => {
                self.session.console.scroll_output_up();
                return;
            }
            KeyCode::F(2) => {
                self.session.console.scroll_output_down();
                return;
            }
            _ => {}
        }

        match self.focused_panel {
            Panel::Stack => match key.code {
                KeyCode::Left => self.session.stack_grid.highlight_col -= 1,
                KeyCode::Right => self.session.stack_grid.highlight_col += 1,
                _ => {}
            },
            Panel::Code => match key.code {
                KeyCode::Up => {
                    self.session.code_grid.top_index =
                        self.session.code_grid.top_index.saturating_sub(1);
                }
                KeyCode::Down => {
                    self.session.code_grid.top_index =
                        self.session.code_grid.top_index.saturating_add(1);
                }
                _ => {}
            },
            Panel::Memory => {
                let memory_count = self.session.engine().map_or(0, |e| e.memory_count());
                match key.code {
                    KeyCode::Up => {
                        if self.session.memo_byte_start >= MEMORY_BYTES_PER_LINE {
                            self.session.memo_byte_start -= MEMORY_BYTES_PER_LINE;
                        }
                    }
                    KeyCode::Down => {
                        self.session.memo_byte_start += MEMORY_BYTES_PER_LINE;
                    }
                    KeyCode::Left => {
                        self.session.memo_byte_start =
                            self.session.memo_byte_start.saturating_sub(1);
                    }
                    KeyCode::Right => self.session.memo_byte_start += 1,
                    KeyCode::PageDown => {
                        if self.session.memo_index + 1 < memory_count {
                            self.session.memo_index += 1;
                        }
                    }
                    KeyCode::PageUp => {
                        self.session.memo_index = self.session.memo_index.saturating_sub(1);
                    }
                    _ => {}
                }
            }
            Panel::Command => match key.code {
                KeyCode::Enter => {
                    if let Some(line) = self.session.console.submit() {
                        self.session.handle_command(&line);
                    }
                }
                KeyCode::Backspace => self.session.console.backspace(),
                KeyCode::Delete => self.session.console.delete_forward(),
                KeyCode::Up => self.session.console.history_up(),
                KeyCode::Down => self.session.console.history_down(),
                KeyCode::Left => self.session.console.move_cursor(CursorMove::Left),
                KeyCode::Right => self.session.console.move_cursor(CursorMove::Right),
                KeyCode::Home => self.session.console.move_cursor(CursorMove::Home),
                KeyCode::End => self.session.console.move_cursor(CursorMove::End),
                KeyCode::Char(c) => self.session.console.insert_char(c),
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MockEngineFactory;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    const LISTING: &str = "\
        i32.const 1\n\
        i32.const 2\n\
        i32.add\n";

    fn app() -> App {
        App::new(DebugSession::new(Box::new(MockEngineFactory::new(LISTING))))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

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
    fn test_menu_opens_listing_view() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Listing);
        assert!(!app.menu_focused);

        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains(" LISTING "));
        assert!(text.contains("i32.add"));
    }

    #[test]
    fn test_listing_keys_move_highlight_and_return() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.listing_grid.highlight_line, 0);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.listing_grid.highlight_line, 2);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.listing_grid.highlight_line, 1);

        press(&mut app, KeyCode::Esc);
        assert!(app.menu_focused);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_menu_opens_debug_view_with_command_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, View::Debug);
        assert_eq!(app.focused_panel, Panel::Command);
    }
}
