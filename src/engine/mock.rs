//! Scripted engine used by the binary and the integration tests.
//!
//! `MockEngine` replays a textual instruction listing instead of executing a
//! real module. It models just enough of a stack machine to make the
//! debugger panels interesting: constant pushes, `i32.add`, `drop`, and an
//! `unreachable` trap. It is a deterministic fixture, not a virtual machine.
//!
//! # Listing format
//!
//! One instruction per line. Blank lines and lines starting with `;;` are
//! skipped. Directives:
//!
//! - `.export <name>` — export the next instruction as function `<name>`
//! - `.memory <bytes>` — declare a linear memory of the given size
//! - `.data <memo> <offset> <text>` — seed a memory with ASCII text
//!
//! Unknown mnemonics behave as no-ops so arbitrary disassembly dumps can be
//! loaded and stepped through.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{
    Engine, EngineError, EngineFactory, EngineMessage, FunctionHandle, Instruction, StackValue,
};

#[derive(Debug, Clone)]
enum Effect {
    PushI32(i32),
    PushI64(i64),
    PushF32(f32),
    PushF64(f64),
    AddI32,
    Drop,
    Unreachable,
    Nop,
}

impl Effect {
    /// Encoded size in bytes: one opcode byte plus any immediate.
    fn encoded_size(&self) -> u32 {
        match self {
            Effect::PushI32(_) | Effect::PushF32(_) => 5,
            Effect::PushI64(_) | Effect::PushF64(_) => 9,
            _ => 1,
        }
    }
}

struct Listing {
    instructions: Vec<Instruction>,
    effects: Vec<Effect>,
    exports: FxHashMap<String, u32>,
    memories: Vec<Vec<u8>>,
    end_offset: u32,
}

fn parse_operand<T: std::str::FromStr>(
    line: &str,
    operand: Option<&str>,
) -> Result<T, EngineError> {
    operand
        .and_then(|o| o.parse().ok())
        .ok_or_else(|| EngineError::Construction {
            reason: format!("bad operand in '{}'", line),
        })
}

fn parse_listing(source: &str) -> Result<Listing, EngineError> {
    let mut listing = Listing {
        instructions: Vec::new(),
        effects: Vec::new(),
        exports: FxHashMap::default(),
        memories: Vec::new(),
        end_offset: 0,
    };
    let mut offset = 0u32;

    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(";;") {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let head = tokens.next().unwrap_or_default();

        match head {
            ".export" => {
                let name = tokens.next().ok_or_else(|| EngineError::Construction {
                    reason: format!("missing export name in '{}'", line),
                })?;
                listing
                    .exports
                    .insert(name.to_string(), listing.instructions.len() as u32);
            }
            ".memory" => {
                let size: usize = parse_operand(line, tokens.next())?;
                listing.memories.push(vec![0; size]);
            }
            ".data" => {
                let memo: usize = parse_operand(line, tokens.next())?;
                let start: usize = parse_operand(line, tokens.next())?;
                let text = tokens.collect::<Vec<_>>().join(" ");
                let memory =
                    listing
                        .memories
                        .get_mut(memo)
                        .ok_or_else(|| EngineError::Construction {
                            reason: format!("no memory #{} for '{}'", memo, line),
                        })?;
                for (i, byte) in text.bytes().enumerate() {
                    if let Some(slot) = memory.get_mut(start + i) {
                        *slot = byte;
                    }
                }
            }
            _ => {
                let effect = match head {
                    "i32.const" => Effect::PushI32(parse_operand(line, tokens.next())?),
                    "i64.const" => Effect::PushI64(parse_operand(line, tokens.next())?),
                    "f32.const" => Effect::PushF32(parse_operand(line, tokens.next())?),
                    "f64.const" => Effect::PushF64(parse_operand(line, tokens.next())?),
                    "i32.add" => Effect::AddI32,
                    "drop" => Effect::Drop,
                    "unreachable" => Effect::Unreachable,
                    _ => Effect::Nop,
                };
                listing.instructions.push(Instruction {
                    offset,
                    text: line.to_string(),
                });
                offset += effect.encoded_size();
                listing.effects.push(effect);
            }
        }
    }

    if listing.instructions.is_empty() {
        return Err(EngineError::Construction {
            reason: "listing contains no instructions".to_string(),
        });
    }
    // A listing without exports still needs an entry point for `main`.
    if listing.exports.is_empty() {
        listing.exports.insert("main".to_string(), 0);
    }
    listing.end_offset = offset;
    Ok(listing)
}

pub struct MockEngine {
    instructions: Vec<Instruction>,
    effects: Vec<Effect>,
    exports: FxHashMap<String, u32>,
    memories: Vec<Vec<u8>>,
    end_offset: u32,

    pc: usize,
    main: Option<usize>,
    returned: bool,
    stack: Vec<StackValue>,
    breakpoints: FxHashSet<u32>,
    messages: Vec<EngineMessage>,
}

impl MockEngine {
    pub fn from_listing(source: &str) -> Result<Self, EngineError> {
        let listing = parse_listing(source)?;
        Ok(MockEngine {
            instructions: listing.instructions,
            effects: listing.effects,
            exports: listing.exports,
            memories: listing.memories,
            end_offset: listing.end_offset,
            pc: 0,
            main: None,
            returned: false,
            stack: Vec::new(),
            breakpoints: FxHashSet::default(),
            messages: Vec::new(),
        })
    }

    fn pop(&mut self) -> Result<StackValue, EngineError> {
        self.stack.pop().ok_or(EngineError::Trap {
            reason: "value stack underflow".to_string(),
        })
    }

    fn execute_current(&mut self) -> Result<(), EngineError> {
        let effect = self.effects[self.pc].clone();
        match effect {
            Effect::PushI32(v) => self.stack.push(StackValue::from_i32(v)),
            Effect::PushI64(v) => self.stack.push(StackValue::from_i64(v)),
            Effect::PushF32(v) => self.stack.push(StackValue::from_f32(v)),
            Effect::PushF64(v) => self.stack.push(StackValue::from_f64(v)),
            Effect::AddI32 => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.stack
                    .push(StackValue::from_i32(a.as_i32().wrapping_add(b.as_i32())));
            }
            Effect::Drop => {
                self.pop()?;
            }
            Effect::Unreachable => {
                self.messages
                    .push(EngineMessage::Err("unreachable executed".to_string()));
                self.returned = true;
                return Err(EngineError::Trap {
                    reason: "unreachable".to_string(),
                });
            }
            Effect::Nop => {}
        }
        self.pc += 1;
        if self.pc >= self.instructions.len() {
            self.returned = true;
            self.messages
                .push(EngineMessage::Out("execution finished".to_string()));
        }
        Ok(())
    }
}

impl Engine for MockEngine {
    fn disassemble(&self) -> Vec<Instruction> {
        self.instructions.clone()
    }

    fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    fn stack_value(&self, depth: usize) -> Option<StackValue> {
        if depth >= self.stack.len() {
            return None;
        }
        Some(self.stack[self.stack.len() - depth - 1])
    }

    fn memory_count(&self) -> usize {
        self.memories.len()
    }

    fn memory_size(&self, memo: usize) -> usize {
        self.memories.get(memo).map_or(0, Vec::len)
    }

    fn memory_byte(&self, memo: usize, index: usize) -> Option<u8> {
        self.memories.get(memo).and_then(|m| m.get(index)).copied()
    }

    fn find_export(&self, name: &str) -> Option<FunctionHandle> {
        self.exports.get(name).map(|&idx| FunctionHandle(idx))
    }

    fn set_main_function(&mut self, func: FunctionHandle) -> Result<(), EngineError> {
        let idx = func.0 as usize;
        if idx >= self.instructions.len() {
            return Err(EngineError::Trap {
                reason: "function handle out of range".to_string(),
            });
        }
        self.pc = idx;
        self.main = Some(idx);
        self.returned = false;
        self.stack.clear();
        Ok(())
    }

    fn main_function_set(&self) -> bool {
        self.main.is_some()
    }

    fn main_returned(&self) -> bool {
        self.returned
    }

    fn step(&mut self) -> Result<(), EngineError> {
        if self.main.is_none() {
            return Err(EngineError::MainFunctionNotSet);
        }
        if self.returned {
            return Err(EngineError::Finished);
        }
        self.execute_current()
    }

    fn run(&mut self) -> Result<(), EngineError> {
        if self.main.is_none() {
            return Err(EngineError::MainFunctionNotSet);
        }
        if self.returned {
            return Err(EngineError::Finished);
        }
        loop {
            self.execute_current()?;
            if self.returned || self.breakpoints.contains(&self.pc_offset()) {
                return Ok(());
            }
        }
    }

    fn add_breakpoint(&mut self, offset: u32) {
        self.breakpoints.insert(offset);
    }

    fn remove_breakpoint(&mut self, offset: u32) {
        self.breakpoints.remove(&offset);
    }

    fn pc_offset(&self) -> u32 {
        self.instructions
            .get(self.pc)
            .map_or(self.end_offset, |i| i.offset)
    }

    fn drain_messages(&mut self) -> Vec<EngineMessage> {
        std::mem::take(&mut self.messages)
    }
}

/// Builds a fresh [`MockEngine`] from the same listing on every call, so a
/// session restart starts from a clean slate.
pub struct MockEngineFactory {
    source: String,
}

impl MockEngineFactory {
    pub fn new(source: impl Into<String>) -> Self {
        MockEngineFactory {
            source: source.into(),
        }
    }
}

impl EngineFactory for MockEngineFactory {
    fn create(&self) -> Result<Box<dyn Engine>, EngineError> {
        Ok(Box::new(MockEngine::from_listing(&self.source)?))
    }
}
