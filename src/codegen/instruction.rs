use std::fmt::Display;

use crate::{analyzer::symbol_table::Location, ast::types::Operator};

/// Index of an instruction in a [`Program`].
pub type Address = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Eq,
}

/// Second operand of an arithmetic or compare instruction; the first is
/// always the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Immediate(i32),
    Memory(Location),
}

/// One instruction of the accumulator machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `acc := value`
    LoadImmediate(i32),
    /// `acc := mem[loc]`
    Load(Location),
    /// `mem[loc] := acc`
    Store(Location),
    /// `acc := acc op operand`
    Arith(ArithOp, Operand),
    /// `acc := 1` if `acc op operand` holds, else `0`
    Compare(CompareOp, Operand),
    Jump(Address),
    /// Jumps when `acc == 0`.
    JumpIfZero(Address),
    /// `mem[loc] := next input`
    Read(Location),
    /// Outputs `acc`.
    Write,
    Halt,
}

impl Instruction {
    /// The instruction applying `op` to the accumulator and `operand`.
    pub fn for_operator(op: Operator, operand: Operand) -> Instruction {
        match op {
            Operator::Plus => Instruction::Arith(ArithOp::Add, operand),
            Operator::Minus => Instruction::Arith(ArithOp::Sub, operand),
            Operator::Times => Instruction::Arith(ArithOp::Mul, operand),
            Operator::Over => Instruction::Arith(ArithOp::Div, operand),
            Operator::Less => Instruction::Compare(CompareOp::Lt, operand),
            Operator::Equal => Instruction::Compare(CompareOp::Eq, operand),
        }
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Instruction::Jump(_) | Instruction::JumpIfZero(_))
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::LoadImmediate(_) => "LDC",
            Instruction::Load(_) => "LD",
            Instruction::Store(_) => "ST",
            Instruction::Arith(ArithOp::Add, _) => "ADD",
            Instruction::Arith(ArithOp::Sub, _) => "SUB",
            Instruction::Arith(ArithOp::Mul, _) => "MUL",
            Instruction::Arith(ArithOp::Div, _) => "DIV",
            Instruction::Compare(CompareOp::Lt, _) => "LT",
            Instruction::Compare(CompareOp::Eq, _) => "EQ",
            Instruction::Jump(_) => "JMP",
            Instruction::JumpIfZero(_) => "JZ",
            Instruction::Read(_) => "IN",
            Instruction::Write => "OUT",
            Instruction::Halt => "HALT",
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Immediate(value) => write!(f, "#{}", value),
            Operand::Memory(location) => write!(f, "{}", location),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mnemonic = self.mnemonic();
        match self {
            Instruction::LoadImmediate(value) => write!(f, "{} #{}", mnemonic, value),
            Instruction::Load(location)
            | Instruction::Store(location)
            | Instruction::Read(location) => write!(f, "{} {}", mnemonic, location),
            Instruction::Arith(_, operand) | Instruction::Compare(_, operand) => {
                write!(f, "{} {}", mnemonic, operand)
            }
            Instruction::Jump(target) | Instruction::JumpIfZero(target) => {
                write!(f, "{} {}", mnemonic, target)
            }
            Instruction::Write | Instruction::Halt => write!(f, "{}", mnemonic),
        }
    }
}

/// A finished, fully backpatched instruction sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
    /// Variables plus scratch cells the program touches.
    memory_size: usize,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>, memory_size: usize) -> Self {
        Program {
            instructions,
            memory_size,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, address: Address) -> Option<&Instruction> {
        self.instructions.get(address)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn memory_size(&self) -> usize {
        self.memory_size
    }
}

/// One `addr: MNEMONIC operand` line per instruction.
impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (address, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "{:>3}: {}", address, instruction)?;
        }
        Ok(())
    }
}
