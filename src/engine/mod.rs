//! Execution-engine collaborator interface.
//!
//! The debugger core never executes instructions itself; everything it knows
//! about the running program arrives through the [`Engine`] trait: the current
//! disassembly, the value stack, linear memories, and a handful of control
//! calls (`step`, `run`, breakpoint registration). Engines are created through
//! an [`EngineFactory`] so the `restart` command can request a fresh instance.
//!
//! [`MockEngine`] is a scripted stand-in driven by a textual instruction
//! listing; it backs the binary and the integration tests.

pub mod disasm;
pub mod mock;
pub mod value;

use std::fmt;

pub use disasm::{Instruction, LineTable};
pub use mock::{MockEngine, MockEngineFactory};
pub use value::{StackValue, ValueType};

/// Opaque handle to an exported function, resolved by [`Engine::find_export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionHandle(pub u32);

/// Errors surfaced by an engine. None of these abort the debugging session;
/// the console reports them as one-line messages and stays interactive.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// The engine could not be constructed for the loaded program. This is
    /// the only condition fatal to the debug view.
    Construction { reason: String },

    /// A control call arrived before a main function was set.
    MainFunctionNotSet,

    /// The main function already ran to completion.
    Finished,

    /// Execution trapped.
    Trap { reason: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Construction { reason } => {
                write!(f, "engine construction failed: {}", reason)
            }
            EngineError::MainFunctionNotSet => write!(f, "no main function set"),
            EngineError::Finished => write!(f, "execution already finished"),
            EngineError::Trap { reason } => write!(f, "trap: {}", reason),
        }
    }
}

/// Text emitted by the engine while executing. The console appends these
/// verbatim to its output log, prefixing error-channel lines with `[ERR] `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMessage {
    Out(String),
    Err(String),
}

/// The narrow query/control surface the debugger consumes.
///
/// Index conventions: stack reads are counted from the top (`0` = most
/// recently pushed); breakpoints and the program counter are byte offsets
/// into the instruction stream.
pub trait Engine {
    /// Disassembly of the active module, regenerated on demand.
    fn disassemble(&self) -> Vec<Instruction>;

    fn stack_depth(&self) -> usize;

    /// Read the stack value `depth` entries below the top.
    fn stack_value(&self, depth: usize) -> Option<StackValue>;

    fn memory_count(&self) -> usize;
    fn memory_size(&self, memo: usize) -> usize;
    fn memory_byte(&self, memo: usize, index: usize) -> Option<u8>;

    fn find_export(&self, name: &str) -> Option<FunctionHandle>;
    fn set_main_function(&mut self, func: FunctionHandle) -> Result<(), EngineError>;
    fn main_function_set(&self) -> bool;
    fn main_returned(&self) -> bool;

    /// Execute exactly one instruction.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Run until completion or the next breakpoint.
    fn run(&mut self) -> Result<(), EngineError>;

    fn add_breakpoint(&mut self, offset: u32);
    fn remove_breakpoint(&mut self, offset: u32);

    fn pc_offset(&self) -> u32;

    /// Take the output/error text produced since the last drain.
    fn drain_messages(&mut self) -> Vec<EngineMessage>;
}

/// Creates engines for the loaded program. `restart` goes through this to
/// replace the current instance wholesale.
pub trait EngineFactory {
    fn create(&self) -> Result<Box<dyn Engine>, EngineError>;
}
