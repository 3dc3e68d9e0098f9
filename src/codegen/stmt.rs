use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::CodegenError,
};

use super::{codegen::CodeGenerator, expr::gen_expression, instruction::Instruction};

/// Emits every statement of the sequence starting at `head`, in order.
pub fn gen_statement_sequence(
    generator: &mut CodeGenerator<'_>,
    head: NodeId,
) -> Result<(), CodegenError> {
    let ast = generator.ast;
    for statement in ast.siblings(head) {
        gen_statement(generator, statement)?;
    }
    Ok(())
}

pub fn gen_statement(generator: &mut CodeGenerator<'_>, id: NodeId) -> Result<(), CodegenError> {
    let ast = generator.ast;
    let node = ast.node(id);

    match &node.kind {
        NodeKind::If {
            test,
            then_part,
            else_part,
        } => {
            gen_expression(generator, *test)?;
            let skip_then = generator.emit_jump_if_zero_placeholder();
            gen_statement_sequence(generator, *then_part)?;

            match else_part {
                Some(else_part) => {
                    let skip_else = generator.emit_jump_placeholder();
                    let else_start = generator.next_address();
                    generator.backpatch(skip_then, else_start)?;

                    gen_statement_sequence(generator, *else_part)?;
                    let end = generator.next_address();
                    generator.backpatch(skip_else, end)?;
                }
                None => {
                    let end = generator.next_address();
                    generator.backpatch(skip_then, end)?;
                }
            }
        }
        NodeKind::Repeat { body, test } => {
            let start = generator.next_address();
            gen_statement_sequence(generator, *body)?;
            gen_expression(generator, *test)?;
            // Loop again while the condition is false
            generator.emit(Instruction::JumpIfZero(start));
        }
        NodeKind::Assign { name, value } => {
            gen_expression(generator, *value)?;
            let location = generator.location_of(name, node.line)?;
            generator.emit(Instruction::Store(location));
        }
        NodeKind::Read { name } => {
            let location = generator.location_of(name, node.line)?;
            generator.emit(Instruction::Read(location));
        }
        NodeKind::Write { value } => {
            gen_expression(generator, *value)?;
            generator.emit(Instruction::Write);
        }
        NodeKind::Op { .. } | NodeKind::Const { .. } | NodeKind::Id { .. } => {
            unreachable!("expression {:?} in statement position", node.kind)
        }
    }

    Ok(())
}
