//! # Introduction
//!
//! stacktty is an interactive terminal debugger for a stack-based virtual
//! machine.  It loads an instruction listing, executes it step by step or
//! until a breakpoint, and shows the machine state live in a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Architecture
//!
//! ```text
//! Listing → Engine → DebugSession → TUI panels
//! ```
//!
//! 1. [`engine`] — the narrow query/control interface a debuggable engine
//!    exposes, plus a scripted mock engine that parses textual listings.
//! 2. [`debugger`] — session state: breakpoints, the console line editor
//!    and log, and the typed command interpreter.
//! 3. [`ui`] — ratatui-based TUI: a shared grid renderer, the four debug
//!    panels (stack, code, memory, command), and the event loop.
//!
//! ## Debug commands
//!
//! `help`, `clear`, `restart`, `main <function>`, `step`, `continue`,
//! `print stack[N].<type>`, `break <line>`, `breakrm <line>`, `breakls`.
//! Type `help` in the command panel for the full list.

pub mod config;
pub mod debugger;
pub mod engine;
pub mod ui;
