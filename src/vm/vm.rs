use tracing::trace;

use crate::{
    codegen::instruction::{Address, ArithOp, CompareOp, Instruction, Operand, Program},
    errors::errors::VmError,
};

pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Interpreter for programs produced by the code generator.
///
/// Memory is zero-initialized on every run and sized by the program.
pub struct Machine {
    program: Program,
    memory: Vec<i32>,
    accumulator: i32,
    pc: Address,
    step_limit: usize,
}

impl Machine {
    pub fn new(program: Program) -> Self {
        Machine {
            memory: vec![0; program.memory_size()],
            program,
            accumulator: 0,
            pc: 0,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    /// Caps the number of instructions a single run may execute.
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn memory(&self) -> &[i32] {
        &self.memory
    }

    /// Executes from address 0 until `HALT`.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Values consumed in order by `IN` instructions
    ///
    /// # Returns
    ///
    /// Every value written by `OUT`, in order.
    pub fn run(&mut self, inputs: &[i32]) -> Result<Vec<i32>, VmError> {
        self.memory.iter_mut().for_each(|cell| *cell = 0);
        self.accumulator = 0;
        self.pc = 0;

        let mut inputs = inputs.iter().copied();
        let mut outputs = vec![];
        let mut steps = 0;

        loop {
            if steps == self.step_limit {
                return Err(VmError::StepLimitExceeded {
                    limit: self.step_limit,
                });
            }
            steps += 1;

            let address = self.pc;
            let instruction = *self
                .program
                .get(address)
                .ok_or(VmError::AddressOutOfRange { address })?;
            trace!(address, %instruction, accumulator = self.accumulator, "step");
            self.pc += 1;

            match instruction {
                Instruction::LoadImmediate(value) => self.accumulator = value,
                Instruction::Load(location) => {
                    self.accumulator = *self.cell(location, address)?;
                }
                Instruction::Store(location) => {
                    let value = self.accumulator;
                    *self.cell(location, address)? = value;
                }
                Instruction::Arith(op, operand) => {
                    let value = self.operand(operand, address)?;
                    self.accumulator = match op {
                        ArithOp::Add => self.accumulator.wrapping_add(value),
                        ArithOp::Sub => self.accumulator.wrapping_sub(value),
                        ArithOp::Mul => self.accumulator.wrapping_mul(value),
                        ArithOp::Div => {
                            if value == 0 {
                                return Err(VmError::DivisionByZero { address });
                            }
                            self.accumulator.wrapping_div(value)
                        }
                    };
                }
                Instruction::Compare(op, operand) => {
                    let value = self.operand(operand, address)?;
                    let holds = match op {
                        CompareOp::Lt => self.accumulator < value,
                        CompareOp::Eq => self.accumulator == value,
                    };
                    self.accumulator = holds as i32;
                }
                Instruction::Jump(target) => self.pc = target,
                Instruction::JumpIfZero(target) => {
                    if self.accumulator == 0 {
                        self.pc = target;
                    }
                }
                Instruction::Read(location) => {
                    let value = inputs
                        .next()
                        .ok_or(VmError::InputExhausted { address })?;
                    *self.cell(location, address)? = value;
                }
                Instruction::Write => outputs.push(self.accumulator),
                Instruction::Halt => return Ok(outputs),
            }
        }
    }

    fn cell(&mut self, location: usize, address: Address) -> Result<&mut i32, VmError> {
        self.memory
            .get_mut(location)
            .ok_or(VmError::MemoryOutOfRange { location, address })
    }

    fn operand(&mut self, operand: Operand, address: Address) -> Result<i32, VmError> {
        match operand {
            Operand::Immediate(value) => Ok(value),
            Operand::Memory(location) => Ok(*self.cell(location, address)?),
        }
    }
}
