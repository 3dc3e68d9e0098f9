use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    analyzer::symbol_table::{Location, SymbolTable},
    ast::ast::Ast,
    errors::errors::CodegenError,
};

use super::{
    instruction::{Address, Instruction, Program},
    stmt::gen_statement_sequence,
};

/// Target written into a placeholder jump until it is backpatched.
const PLACEHOLDER: Address = Address::MAX;

/// Emission state for one program.
///
/// The generator only ever reads the tree and the symbol table. Instructions
/// are appended in order, so the address of the next instruction is always
/// the current length of the buffer.
pub struct CodeGenerator<'a> {
    /// The analyzed tree being lowered
    pub ast: &'a Ast,
    /// Locations assigned during analysis
    pub symbols: &'a SymbolTable,

    instructions: Vec<Instruction>,
    /// Placeholder jumps that still wait for a target
    pending: HashSet<Address>,
    /// Scratch cells currently in use, allocated above the variables
    scratch_depth: usize,
    peak_scratch_depth: usize,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(ast: &'a Ast, symbols: &'a SymbolTable) -> Self {
        CodeGenerator {
            ast,
            symbols,
            instructions: vec![],
            pending: HashSet::new(),
            scratch_depth: 0,
            peak_scratch_depth: 0,
        }
    }

    /// Address the next emitted instruction will get.
    pub fn next_address(&self) -> Address {
        self.instructions.len()
    }

    pub fn emit(&mut self, instruction: Instruction) -> Address {
        let address = self.next_address();
        trace!(address, %instruction, "emit");
        self.instructions.push(instruction);
        address
    }

    /// Emits a `JMP` whose target is filled in later by [`Self::backpatch`].
    pub fn emit_jump_placeholder(&mut self) -> Address {
        let address = self.emit(Instruction::Jump(PLACEHOLDER));
        self.pending.insert(address);
        address
    }

    /// Emits a `JZ` whose target is filled in later by [`Self::backpatch`].
    pub fn emit_jump_if_zero_placeholder(&mut self) -> Address {
        let address = self.emit(Instruction::JumpIfZero(PLACEHOLDER));
        self.pending.insert(address);
        address
    }

    /// Points the placeholder jump at `address` to `target`.
    ///
    /// # Arguments
    ///
    /// * `address` - Address returned by one of the placeholder emitters
    /// * `target` - Address the jump should transfer control to
    ///
    /// # Returns
    ///
    /// `CodegenError::NotAJump` if `address` holds anything but a pending
    /// placeholder.
    pub fn backpatch(&mut self, address: Address, target: Address) -> Result<(), CodegenError> {
        if !self.pending.remove(&address) {
            return Err(CodegenError::NotAJump { address });
        }

        match self.instructions.get_mut(address) {
            Some(Instruction::Jump(slot)) | Some(Instruction::JumpIfZero(slot)) => {
                *slot = target;
                debug!(address, target, "backpatched jump");
                Ok(())
            }
            _ => Err(CodegenError::NotAJump { address }),
        }
    }

    /// Location of a variable the analyzer has seen.
    pub fn location_of(&self, name: &str, line: u32) -> Result<Location, CodegenError> {
        self.symbols
            .location_of(name)
            .ok_or_else(|| CodegenError::UnknownVariable {
                name: name.to_string(),
                line,
            })
    }

    /// Reserves the next free scratch cell.
    pub fn claim_scratch(&mut self) -> Location {
        let location = self.symbols.len() + self.scratch_depth;
        self.scratch_depth += 1;
        self.peak_scratch_depth = self.peak_scratch_depth.max(self.scratch_depth);
        location
    }

    /// Returns the `count` most recently claimed scratch cells.
    pub fn release_scratch(&mut self, count: usize) {
        self.scratch_depth -= count;
    }

    /// Appends the final `HALT` and checks every placeholder was resolved.
    pub fn finish(mut self) -> Result<Program, CodegenError> {
        self.emit(Instruction::Halt);

        if let Some(&address) = self.pending.iter().min() {
            return Err(CodegenError::UnpatchedJump { address });
        }

        let memory_size = self.symbols.len() + self.peak_scratch_depth;
        debug!(
            instructions = self.instructions.len(),
            memory_size, "code generation finished"
        );
        Ok(Program::new(self.instructions, memory_size))
    }
}

/// Lowers an analyzed tree to a program for the accumulator machine.
///
/// # Arguments
///
/// * `ast` - A tree whose analysis produced no diagnostics
/// * `symbols` - The symbol table from that same analysis
///
/// # Returns
///
/// The backpatched program, ending in a single `HALT`, or the internal error
/// that shows the inputs did not come from a clean analysis.
pub fn generate(ast: &Ast, symbols: &SymbolTable) -> Result<Program, CodegenError> {
    let mut generator = CodeGenerator::new(ast, symbols);

    if let Some(root) = ast.root() {
        gen_statement_sequence(&mut generator, root)?;
    }

    generator.finish()
}
