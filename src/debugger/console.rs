//! Console line editor, command history, and output log.

/// Cursor movements understood by the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Home,
    End,
}

/// The interactive console of a debugging session.
///
/// Command buffers form an append-only history; `history_scroll` selects the
/// buffer currently being edited and `cursor` indexes into it. Output lines
/// are append-only too, with `usize::MAX` as the "stick to bottom" scroll
/// sentinel so fresh lines are always visible until the user scrolls.
pub struct ConsoleSession {
    history: Vec<String>,
    history_scroll: usize,
    cursor: usize,
    output: Vec<String>,
    output_scroll: usize,
}

impl ConsoleSession {
    pub fn new() -> Self {
        ConsoleSession {
            history: vec![String::new()],
            history_scroll: 0,
            cursor: 0,
            output: Vec::new(),
            output_scroll: usize::MAX,
        }
    }

    pub fn active_line(&self) -> &str {
        &self.history[self.history_scroll]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Insert a printable character at the cursor. Control and non-ASCII
    /// input is ignored.
    pub fn insert_char(&mut self, c: char) {
        if !c.is_ascii_graphic() && c != ' ' {
            return;
        }
        let buffer = &mut self.history[self.history_scroll];
        buffer.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.history[self.history_scroll].remove(self.cursor);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.history[self.history_scroll].len() {
            self.history[self.history_scroll].remove(self.cursor);
        }
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let len = self.history[self.history_scroll].len();
        self.cursor = match movement {
            CursorMove::Left => self.cursor.saturating_sub(1),
            CursorMove::Right => (self.cursor + 1).min(len),
            CursorMove::Home => 0,
            CursorMove::End => len,
        };
    }

    /// Browse one entry back in history. Never mutates buffer contents.
    pub fn history_up(&mut self) {
        if self.history_scroll > 0 {
            self.history_scroll -= 1;
            self.clamp_cursor();
        }
    }

    /// Browse one entry forward in history.
    pub fn history_down(&mut self) {
        if self.history_scroll + 1 < self.history.len() {
            self.history_scroll += 1;
            self.clamp_cursor();
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.history[self.history_scroll].len());
    }

    /// Finish editing and return the line to execute.
    ///
    /// A non-empty buffer is submitted as-is. An empty buffer resubmits the
    /// most recent prior non-empty command instead (copied forward, not
    /// moved); with no prior history this is a no-op. Afterwards a fresh
    /// empty buffer becomes the active one.
    pub fn submit(&mut self) -> Option<String> {
        let active = &self.history[self.history_scroll];
        let line = if !active.is_empty() {
            active.clone()
        } else {
            self.history[..self.history.len() - 1]
                .iter()
                .rev()
                .find(|buffer| !buffer.is_empty())?
                .clone()
        };
        let last = self.history.len() - 1;
        self.history[last] = line.clone();
        self.history.push(String::new());
        self.history_scroll = self.history.len() - 1;
        self.cursor = 0;
        Some(line)
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn push_output(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn output_scroll(&self) -> usize {
        self.output_scroll
    }

    /// Write back the clamped scroll offset after a render pass.
    pub fn set_output_scroll(&mut self, offset: usize) {
        self.output_scroll = offset;
    }

    pub fn scroll_output_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_output_down(&mut self) {
        self.output_scroll = self.output_scroll.saturating_add(1);
    }

    /// Re-arm the sentinel so new output lines stay visible.
    pub fn stick_output_to_bottom(&mut self) {
        self.output_scroll = usize::MAX;
    }
}

impl Default for ConsoleSession {
    fn default() -> Self {
        Self::new()
    }
}
