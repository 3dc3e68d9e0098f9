//! Unit tests for the companion machine.

use crate::{
    codegen::instruction::{ArithOp, CompareOp, Instruction, Operand, Program},
    errors::errors::VmError,
};

use super::vm::Machine;

use Instruction::*;

fn run(
    instructions: Vec<Instruction>,
    memory_size: usize,
    inputs: &[i32],
) -> Result<Vec<i32>, VmError> {
    Machine::new(Program::new(instructions, memory_size)).run(inputs)
}

#[test]
fn test_echo_input() {
    let outputs = run(vec![Read(0), Load(0), Write, Halt], 1, &[7]).unwrap();

    assert_eq!(outputs, vec![7]);
}

#[test]
fn test_arithmetic() {
    let outputs = run(
        vec![
            LoadImmediate(7),
            Arith(ArithOp::Mul, Operand::Immediate(6)),
            Write,
            Arith(ArithOp::Sub, Operand::Immediate(50)),
            Write,
            Store(0),
            LoadImmediate(17),
            Arith(ArithOp::Div, Operand::Memory(0)),
            Write,
            Halt,
        ],
        1,
        &[],
    )
    .unwrap();

    // Division truncates toward zero
    assert_eq!(outputs, vec![42, -8, -2]);
}

#[test]
fn test_compare_sets_accumulator() {
    let outputs = run(
        vec![
            LoadImmediate(1),
            Compare(CompareOp::Lt, Operand::Immediate(2)),
            Write,
            LoadImmediate(3),
            Compare(CompareOp::Eq, Operand::Immediate(4)),
            Write,
            Halt,
        ],
        0,
        &[],
    )
    .unwrap();

    assert_eq!(outputs, vec![1, 0]);
}

#[test]
fn test_jump_if_zero() {
    let outputs = run(
        vec![
            LoadImmediate(0),
            JumpIfZero(3),
            Write,
            LoadImmediate(5),
            JumpIfZero(6),
            Write,
            Halt,
        ],
        0,
        &[],
    )
    .unwrap();

    assert_eq!(outputs, vec![5]);
}

#[test]
fn test_overflow_wraps() {
    let outputs = run(
        vec![
            LoadImmediate(i32::MAX),
            Arith(ArithOp::Add, Operand::Immediate(1)),
            Write,
            Halt,
        ],
        0,
        &[],
    )
    .unwrap();

    assert_eq!(outputs, vec![i32::MIN]);
}

#[test]
fn test_division_by_zero() {
    let error = run(
        vec![
            LoadImmediate(1),
            Arith(ArithOp::Div, Operand::Immediate(0)),
            Halt,
        ],
        0,
        &[],
    )
    .unwrap_err();

    assert_eq!(error, VmError::DivisionByZero { address: 1 });
}

#[test]
fn test_input_exhausted() {
    let error = run(vec![Read(0), Read(0), Halt], 1, &[1]).unwrap_err();

    assert_eq!(error, VmError::InputExhausted { address: 1 });
}

#[test]
fn test_running_off_the_end() {
    let error = run(vec![LoadImmediate(1)], 0, &[]).unwrap_err();

    assert_eq!(error, VmError::AddressOutOfRange { address: 1 });
}

#[test]
fn test_memory_out_of_range() {
    let error = run(vec![Store(3), Halt], 2, &[]).unwrap_err();

    assert_eq!(
        error,
        VmError::MemoryOutOfRange {
            location: 3,
            address: 0
        }
    );
}

#[test]
fn test_step_limit() {
    let mut machine = Machine::new(Program::new(vec![Jump(0)], 0)).with_step_limit(100);

    assert_eq!(
        machine.run(&[]),
        Err(VmError::StepLimitExceeded { limit: 100 })
    );
}

#[test]
fn test_runs_start_fresh() {
    let mut machine = Machine::new(Program::new(
        vec![
            Load(0),
            Arith(ArithOp::Add, Operand::Immediate(1)),
            Store(0),
            Write,
            Halt,
        ],
        1,
    ));

    assert_eq!(machine.run(&[]), Ok(vec![1]));
    assert_eq!(machine.run(&[]), Ok(vec![1]));
    assert_eq!(machine.memory(), &[1]);
}
