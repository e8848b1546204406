//! The console command interpreter.
//!
//! Submitted lines are tokenized on whitespace into a verb plus arguments.
//! Argument counts are strict and verb-specific. Nothing here ever faults:
//! every failure path appends one human-readable line to the console log
//! and leaves all other state untouched. The exact message strings are part
//! of the user-facing contract.

use std::sync::LazyLock;

use regex::Regex;

use super::DebugSession;
use crate::engine::ValueType;

static BREAK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").unwrap());

static PRINT_TARGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(stack|memo)\[([0-9]{1,5})\]\.(i32|i64|f32|f64|v128)$").unwrap()
});

const HELP_TEXT: [&str; 12] = [
    "Commands:",
    "  help                    Display this message",
    "  clear                   Clear console",
    "  restart                 Restart the debugging session",
    "  main     <func-name>    Set main function",
    "  step                    Step into execution",
    "  continue                Continue execution",
    "  break    <line>         Add breakpoint at given line",
    "  breakrm  <line>         Remove breakpoint at given line",
    "  breakls                 List all breakpoint lines",
    "  print                   Print to the console:",
    "    stack[top=0].type     Stack value at an index with a type: i32, i64, f32, f64 or v128",
];

/// Where a `print` target reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintSource {
    Stack,
    Memo,
}

/// A parsed `print` argument: `stack[3].i32` and the like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintTarget {
    pub source: PrintSource,
    pub index: usize,
    pub ty: ValueType,
}

/// Parse a breakpoint line argument: decimal, positive, no leading zeros.
pub fn parse_breakpoint_line(arg: &str) -> Option<usize> {
    if !BREAK_LINE_RE.is_match(arg) {
        return None;
    }
    arg.parse().ok()
}

/// Parse a `print` argument against the exact target grammar. The index is
/// capped at five digits by the pattern, so it always fits a `usize`.
pub fn parse_print_target(arg: &str) -> Option<PrintTarget> {
    let captures = PRINT_TARGET_RE.captures(arg)?;
    let source = match &captures[1] {
        "stack" => PrintSource::Stack,
        _ => PrintSource::Memo,
    };
    let index = captures[2].parse().ok()?;
    let ty = ValueType::parse(&captures[3])?;
    Some(PrintTarget { source, index, ty })
}

impl DebugSession {
    /// Execute one submitted console line.
    pub fn handle_command(&mut self, line: &str) {
        self.console.push_output(format!("> {}", line));
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return;
        }

        match (tokens[0], tokens.len()) {
            ("help", 1) => {
                for entry in HELP_TEXT {
                    self.console.push_output(entry);
                }
            }
            ("clear", 1) => self.console.clear_output(),
            ("restart", 1) => {
                self.restart();
                self.drain_engine_messages();
            }
            ("main", 2) => {
                self.set_main(tokens[1]);
                self.drain_engine_messages();
            }
            ("step", 1) => {
                let ok = self.engine_mut().map(|e| e.step().is_ok());
                self.drain_engine_messages();
                if ok != Some(true) {
                    self.console.push_output("Cannot execute next instruction");
                }
            }
            ("continue", 1) => {
                let ok = self.engine_mut().map(|e| e.run().is_ok());
                self.drain_engine_messages();
                if ok != Some(true) {
                    self.console
                        .push_output("Cannot continue executing instructions");
                }
            }
            ("print", 2) => self.print_target(tokens[1]),
            ("break", 2) => match parse_breakpoint_line(tokens[1]) {
                Some(line_number) => {
                    if !self.add_breakpoint(line_number) {
                        self.console
                            .push_output("Breakpoint line number is out of bound");
                    }
                }
                None => self
                    .console
                    .push_output("Error reading the breakpoint offset"),
            },
            ("breakrm", 2) => match parse_breakpoint_line(tokens[1]) {
                Some(line_number) => {
                    if !self.remove_breakpoint(line_number) {
                        self.console
                            .push_output("Breakpoint line number is out of bound");
                    }
                }
                None => self
                    .console
                    .push_output("Error reading the breakpoint offset"),
            },
            ("breakls", 1) => {
                let listed = self
                    .breakpoints()
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                self.console.push_output(format!("[{}]", listed));
            }
            _ => self
                .console
                .push_output(format!("Command '{}' not found", line)),
        }

        self.console.stick_output_to_bottom();
    }

    fn set_main(&mut self, name: &str) {
        let Some(engine) = self.engine_mut() else {
            self.console
                .push_output(format!("Failed to set '{}' main function", name));
            return;
        };
        match engine.find_export(name) {
            Some(handle) => {
                let message = if engine.set_main_function(handle).is_ok() {
                    format!("Program main function set to '{}'", name)
                } else {
                    format!("Failed to set '{}' main function", name)
                };
                self.console.push_output(message);
            }
            None => self
                .console
                .push_output(format!("Function '{}' was not found", name)),
        }
    }

    fn print_target(&mut self, arg: &str) {
        let Some(target) = parse_print_target(arg) else {
            self.console
                .push_output("Please type 'help' for a list of print commands");
            return;
        };
        match target.source {
            PrintSource::Stack => {
                let value = self
                    .engine()
                    .filter(|engine| target.index < engine.stack_depth())
                    .and_then(|engine| engine.stack_value(target.index));
                match value {
                    Some(value) => self.console.push_output(value.format(target.ty)),
                    None => self.console.push_output("Index out of stack bound"),
                }
            }
            PrintSource::Memo => self.console.push_output("Not yet implemented"),
        }
    }

    /// Register a breakpoint for a 1-based code line. Re-adding an existing
    /// line is a no-op; the set stays size-stable.
    pub fn add_breakpoint(&mut self, line: usize) -> bool {
        if line < 1 || line > self.line_table().len() {
            return false;
        }
        let offset = self.line_table.offset_for_line(line);
        if let Some(offset) = offset {
            if let Some(engine) = self.engine_mut() {
                engine.add_breakpoint(offset);
            }
        }
        self.breakpoints.insert(line);
        true
    }

    /// Remove a breakpoint. Lines not in the set are rejected, whether or
    /// not they name a valid code line.
    pub fn remove_breakpoint(&mut self, line: usize) -> bool {
        if !self.breakpoints.contains(&line) {
            return false;
        }
        let offset = self.line_table.offset_for_line(line);
        if let Some(offset) = offset {
            if let Some(engine) = self.engine_mut() {
                engine.remove_breakpoint(offset);
            }
        }
        self.breakpoints.remove(&line);
        true
    }
}
