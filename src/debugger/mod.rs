//! Debugging session state and logic.
//!
//! [`DebugSession`] owns everything with session lifetime: the engine
//! instance (behind the narrow [`Engine`] interface), the breakpoint set,
//! the console, the cached line table, and the scroll/highlight state of
//! each debug panel. `restart` destroys and recreates the engine together
//! with the breakpoint and scroll state.
//!
//! The command interpreter lives in [`commands`]; the console line editor
//! in [`console`].
//!
//! [`Engine`]: crate::engine::Engine

pub mod commands;
pub mod console;

use std::collections::BTreeSet;

use crate::engine::{Engine, EngineFactory, EngineMessage, LineTable};
use crate::ui::grid::{GridState, Highlight};

pub use console::{ConsoleSession, CursorMove};

/// Bytes shown per memory dump line.
pub const MEMORY_BYTES_PER_LINE: usize = 16;

pub struct DebugSession {
    factory: Box<dyn EngineFactory>,
    engine: Option<Box<dyn Engine>>,
    pub console: ConsoleSession,
    breakpoints: BTreeSet<usize>,
    line_table: LineTable,

    // Memory panel state
    pub memo_index: usize,
    pub memo_byte_start: usize,

    // Grid state for the code and stack panels
    pub code_grid: GridState,
    pub stack_grid: GridState,
}

impl DebugSession {
    /// Create a session, constructing the initial engine through `factory`.
    /// A failed construction leaves the session alive but engine-less; the
    /// debug view renders a blocking dialog in that state.
    pub fn new(factory: Box<dyn EngineFactory>) -> Self {
        let engine = factory.create().ok();
        let mut session = DebugSession {
            factory,
            engine,
            console: ConsoleSession::new(),
            breakpoints: BTreeSet::new(),
            line_table: LineTable::default(),
            memo_index: 0,
            memo_byte_start: 0,
            code_grid: GridState::new(Highlight::None, false),
            stack_grid: GridState::new(Highlight::Column, true),
        };
        session.refresh_disassembly();
        session
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&dyn Engine> {
        self.engine.as_deref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut (dyn Engine + 'static)> {
        self.engine.as_deref_mut()
    }

    /// Borrow the engine together with the stack panel grid, for render
    /// code that reads one while scrolling the other.
    pub fn engine_with_stack_grid(&mut self) -> Option<(&dyn Engine, &mut GridState)> {
        let engine = self.engine.as_deref()?;
        Some((engine, &mut self.stack_grid))
    }

    pub fn line_table(&self) -> &LineTable {
        &self.line_table
    }

    pub fn breakpoints(&self) -> &BTreeSet<usize> {
        &self.breakpoints
    }

    /// Regenerate the disassembly and the line table derived from it.
    pub fn refresh_disassembly(&mut self) {
        let instructions = self
            .engine
            .as_deref()
            .map(Engine::disassemble)
            .unwrap_or_default();
        self.line_table = LineTable::new(instructions);
    }

    /// Reset panel scroll state and the breakpoint set to defaults.
    fn reset(&mut self) {
        self.memo_index = 0;
        self.memo_byte_start = 0;
        self.code_grid.reset_scroll();
        self.stack_grid.reset_scroll();
        self.breakpoints.clear();
    }

    /// Replace the engine with a fresh instance. Breakpoints and scroll
    /// state do not survive the swap.
    pub fn restart(&mut self) {
        self.reset();
        self.engine = self.factory.create().ok();
        self.refresh_disassembly();
    }

    /// Move engine output into the console log, error lines prefixed.
    pub fn drain_engine_messages(&mut self) {
        let messages = match self.engine.as_deref_mut() {
            Some(engine) => engine.drain_messages(),
            None => return,
        };
        for message in messages {
            match message {
                EngineMessage::Out(text) => self.console.push_output(text),
                EngineMessage::Err(text) => self.console.push_output(format!("[ERR] {}", text)),
            }
        }
    }

    /// Render the disassembly as display lines: a `>` breakpoint mark,
    /// a right-aligned 1-based line number, then the instruction text.
    /// Updates the code grid highlight to the current pc row and enables
    /// row-follow while the main function is set and still running.
    pub fn code_lines(&mut self) -> Vec<String> {
        let instructions = self.line_table.instructions();
        if instructions.is_empty() {
            return Vec::new();
        }
        let number_width = instructions.len().to_string().len();

        let mut running = false;
        if let Some(engine) = self.engine.as_deref() {
            if let Some(index) = self.line_table.line_index_at_offset(engine.pc_offset()) {
                self.code_grid.highlight_line = index as isize;
            }
            running = engine.main_function_set() && !engine.main_returned();
        }
        self.code_grid.highlight = if running {
            Highlight::Row
        } else {
            Highlight::None
        };
        self.code_grid.follow_scroll = running;

        instructions
            .iter()
            .enumerate()
            .map(|(index, instruction)| {
                let line_number = index + 1;
                let mark = if self.breakpoints.contains(&line_number) {
                    '>'
                } else {
                    ' '
                };
                format!(
                    "{}{:>width$}  {}",
                    mark,
                    line_number,
                    instruction.text,
                    width = number_width
                )
            })
            .collect()
    }
}
