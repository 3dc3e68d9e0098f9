//! Integration tests for end-to-end compilation.
//!
//! These tests verify that the complete pipeline works correctly from source
//! code through scanning, parsing, analysis and code generation, and that the
//! generated programs behave as expected on the companion machine.

use tiny::{
    compile,
    errors::errors::{CompileError, ErrorImpl, VmError},
    vm::vm::Machine,
};

const FACTORIAL: &str = "{ Sample program
  in TINY language -
  computes factorial
}
read x; { input an integer }
if 0 < x then { don't compute if x <= 0 }
  fact := 1;
  repeat
    fact := fact * x;
    x := x - 1
  until x = 0;
  write fact  { output factorial of x }
end
";

fn run_source(source: &str, inputs: &[i32]) -> Result<Vec<i32>, VmError> {
    let compilation = compile(source.to_string(), Some("test.tny".to_string()))
        .expect("program should compile");
    Machine::new(compilation.program).run(inputs)
}

#[test]
fn test_factorial() {
    assert_eq!(run_source(FACTORIAL, &[5]), Ok(vec![120]));
    assert_eq!(run_source(FACTORIAL, &[1]), Ok(vec![1]));
    assert_eq!(run_source(FACTORIAL, &[10]), Ok(vec![3628800]));
}

#[test]
fn test_factorial_skips_non_positive_input() {
    assert_eq!(run_source(FACTORIAL, &[0]), Ok(vec![]));
    assert_eq!(run_source(FACTORIAL, &[-3]), Ok(vec![]));
}

#[test]
fn test_factorial_symbol_table() {
    let compilation = compile(FACTORIAL.to_string(), None).unwrap();
    let symbols = &compilation.symbols;

    assert_eq!(symbols.location_of("x"), Some(0));
    assert_eq!(symbols.location_of("fact"), Some(1));
    assert_eq!(
        symbols.get("x").unwrap().lines().collect::<Vec<_>>(),
        vec![5, 6, 9, 10, 10, 11]
    );
    assert_eq!(
        symbols.get("fact").unwrap().lines().collect::<Vec<_>>(),
        vec![7, 9, 9, 12]
    );
}

#[test]
fn test_read_then_write() {
    assert_eq!(run_source("read x; write x", &[42]), Ok(vec![42]));
}

#[test]
fn test_assignment_chain() {
    assert_eq!(run_source("x := 1; y := x + 1; write y", &[]), Ok(vec![2]));
}

#[test]
fn test_repeat_runs_body_at_least_once() {
    // The condition already holds, but the body still runs
    let source = "x := 0; repeat write x; x := x + 1 until 0 < x";

    assert_eq!(run_source(source, &[]), Ok(vec![0]));
}

#[test]
fn test_countdown() {
    let source = "read x; repeat write x; x := x - 1 until x = 0";

    assert_eq!(run_source(source, &[3]), Ok(vec![3, 2, 1]));
}

#[test]
fn test_if_else_branches() {
    let source = "read x; if x < 0 then write 0 else write x end";

    assert_eq!(run_source(source, &[-4]), Ok(vec![0]));
    assert_eq!(run_source(source, &[9]), Ok(vec![9]));
}

#[test]
fn test_operator_precedence_and_spills() {
    let source = "read a; read b; write a - b * 2; write (a - b) * 2; write 100 / (a - (b + 1))";

    assert_eq!(run_source(source, &[10, 3]), Ok(vec![4, 14, 16]));
}

#[test]
fn test_deeply_nested_right_operands() {
    let source = "read x; write 1 * (2 + 3 * (4 - x))";

    assert_eq!(run_source(source, &[1]), Ok(vec![11]));
}

#[test]
fn test_comparisons_in_conditions() {
    let source = "read a; read b;\nif a = b then write 1 else if a < b then write 2 else write 3 end end";

    assert_eq!(run_source(source, &[4, 4]), Ok(vec![1]));
    assert_eq!(run_source(source, &[1, 4]), Ok(vec![2]));
    assert_eq!(run_source(source, &[9, 4]), Ok(vec![3]));
}

#[test]
fn test_gcd() {
    let source = "read a; read b;
repeat
  if a < b then t := a; a := b; b := t end;
  a := a - b
until a = 0;
write b";

    assert_eq!(run_source(source, &[48, 18]), Ok(vec![6]));
}

#[test]
fn test_runtime_division_by_zero() {
    let result = run_source("read x; write 10 / x", &[0]);

    assert!(matches!(result, Err(VmError::DivisionByZero { .. })));
}

#[test]
fn test_type_errors_block_code_generation() {
    let source = "read x;\nif x then write x end;\ny := x = 1";
    let error = compile(source.to_string(), None).unwrap_err();

    match error {
        CompileError::Semantic(diagnostics) => {
            let kinds: Vec<_> = diagnostics
                .iter()
                .map(|error| (error.line(), error.kind().clone()))
                .collect();
            assert_eq!(
                kinds,
                vec![
                    (2, ErrorImpl::IfTestNotBoolean),
                    (3, ErrorImpl::AssignmentOfNonInteger),
                ]
            );
        }
        other => panic!("expected type errors, found {:?}", other),
    }
}

#[test]
fn test_syntax_error_is_reported_once() {
    let error = compile("read x;\nwrite := 3".to_string(), None).unwrap_err();

    match error {
        CompileError::Syntax(error) => assert_eq!(error.line(), 2),
        other => panic!("expected syntax error, found {:?}", other),
    }
}

#[test]
fn test_unterminated_comment() {
    let error = compile("read x { never closed".to_string(), None).unwrap_err();

    match error {
        CompileError::Syntax(error) => assert_eq!(*error.kind(), ErrorImpl::UnterminatedComment),
        other => panic!("expected syntax error, found {:?}", other),
    }
}

#[test]
fn test_listing_ends_in_single_halt() {
    let compilation = compile(FACTORIAL.to_string(), None).unwrap();
    let listing = compilation.program.to_string();

    assert_eq!(listing.matches("HALT").count(), 1);
    assert!(listing.trim_end().ends_with("HALT"));
}
