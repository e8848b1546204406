//! Disassembly listing and the line table derived from it.

/// One disassembled instruction: its byte offset into the instruction
/// stream and its rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub offset: u32,
    pub text: String,
}

/// 1-based mapping from a displayed code line to its instruction offset.
///
/// Line `n` corresponds to instruction `n - 1` in the current disassembly;
/// the table is rebuilt whenever the disassembly is regenerated.
#[derive(Debug, Clone, Default)]
pub struct LineTable {
    instructions: Vec<Instruction>,
}

impl LineTable {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        LineTable { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Byte offset for a 1-based line number, if the line exists.
    pub fn offset_for_line(&self, line: usize) -> Option<u32> {
        if line < 1 {
            return None;
        }
        self.instructions.get(line - 1).map(|i| i.offset)
    }

    /// 0-based line index of the instruction at `offset`, if any.
    pub fn line_index_at_offset(&self, offset: u32) -> Option<usize> {
        self.instructions.iter().position(|i| i.offset == offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LineTable {
        LineTable::new(vec![
            Instruction {
                offset: 0,
                text: "i32.const 1".into(),
            },
            Instruction {
                offset: 5,
                text: "i32.const 2".into(),
            },
            Instruction {
                offset: 10,
                text: "i32.add".into(),
            },
        ])
    }

    #[test]
    fn test_line_to_offset() {
        let t = table();
        assert_eq!(t.offset_for_line(1), Some(0));
        assert_eq!(t.offset_for_line(3), Some(10));
        assert_eq!(t.offset_for_line(0), None);
        assert_eq!(t.offset_for_line(4), None);
    }

    #[test]
    fn test_offset_to_line_index() {
        let t = table();
        assert_eq!(t.line_index_at_offset(5), Some(1));
        assert_eq!(t.line_index_at_offset(7), None);
    }
}
