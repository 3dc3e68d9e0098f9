use crate::{
    ast::{
        ast::{NodeId, NodeKind},
        types::ExpType,
    },
    errors::errors::CodegenError,
};

use super::{
    codegen::CodeGenerator,
    instruction::{Instruction, Operand},
};

/// Emits code leaving the value of expression `id` in the accumulator.
pub fn gen_expression(generator: &mut CodeGenerator<'_>, id: NodeId) -> Result<(), CodegenError> {
    let ast = generator.ast;
    let node = ast.node(id);

    if node.exp_type() == ExpType::Void {
        return Err(CodegenError::UnanalyzedExpression { line: node.line });
    }

    match &node.kind {
        NodeKind::Const { value } => {
            generator.emit(Instruction::LoadImmediate(*value));
        }
        NodeKind::Id { name } => {
            let location = generator.location_of(name, node.line)?;
            generator.emit(Instruction::Load(location));
        }
        NodeKind::Op { op, lhs, rhs } => {
            gen_expression(generator, *lhs)?;
            let operand = gen_right_operand(generator, *rhs)?;
            generator.emit(Instruction::for_operator(*op, operand));
        }
        _ => unreachable!("statement {:?} in expression position", node.kind),
    }

    Ok(())
}

/// Makes the right operand of an `Op` available without clobbering the left
/// value, which is in the accumulator on entry and on exit.
fn gen_right_operand(
    generator: &mut CodeGenerator<'_>,
    rhs: NodeId,
) -> Result<Operand, CodegenError> {
    let ast = generator.ast;
    let node = ast.node(rhs);

    if node.exp_type() == ExpType::Void {
        return Err(CodegenError::UnanalyzedExpression { line: node.line });
    }

    match &node.kind {
        NodeKind::Const { value } => Ok(Operand::Immediate(*value)),
        NodeKind::Id { name } => Ok(Operand::Memory(generator.location_of(name, node.line)?)),
        _ => {
            let left = generator.claim_scratch();
            generator.emit(Instruction::Store(left));

            gen_expression(generator, rhs)?;
            let right = generator.claim_scratch();
            generator.emit(Instruction::Store(right));

            generator.emit(Instruction::Load(left));
            generator.release_scratch(2);
            Ok(Operand::Memory(right))
        }
    }
}
