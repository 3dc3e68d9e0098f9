//! Unit tests for the AST arena.

use super::{
    ast::{Ast, NodeKind},
    types::{ExpType, Operator},
};

/// Builds `read x; write x + 1` by hand.
fn read_then_write() -> Ast {
    let mut ast = Ast::new();
    let read = ast.new_read(1, "x".to_string());
    let x = ast.new_id(2, "x".to_string());
    let one = ast.new_const(2, 1);
    let sum = ast.new_op(2, Operator::Plus, x, one);
    let write = ast.new_write(2, sum);
    ast.set_sibling(read, write);
    ast.set_root(read);
    ast
}

#[test]
fn test_sibling_chain() {
    let ast = read_then_write();
    let root = ast.root().unwrap();
    let sequence: Vec<_> = ast.siblings(root).collect();

    assert_eq!(sequence.len(), 2);
    assert!(matches!(ast.node(sequence[0]).kind, NodeKind::Read { .. }));
    assert!(matches!(ast.node(sequence[1]).kind, NodeKind::Write { .. }));
    assert_eq!(ast.node(sequence[1]).sibling, None);
}

#[test]
fn test_append_sibling_walks_to_tail() {
    let mut ast = Ast::new();
    let first = ast.new_read(1, "a".to_string());
    let second = ast.new_read(2, "b".to_string());
    let third = ast.new_read(3, "c".to_string());
    ast.append_sibling(first, second);
    ast.append_sibling(first, third);

    let lines: Vec<u32> = ast.siblings(first).map(|id| ast.node(id).line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
#[should_panic(expected = "cycle")]
fn test_sibling_cycle_is_rejected() {
    let mut ast = Ast::new();
    let first = ast.new_read(1, "a".to_string());
    let second = ast.new_read(2, "b".to_string());
    ast.set_sibling(first, second);
    ast.set_sibling(second, first);
}

#[test]
fn test_children_respect_arity() {
    let ast = read_then_write();
    let root = ast.root().unwrap();
    let write = ast.node(root).sibling.unwrap();

    assert_eq!(ast.children(root).count(), 0);
    assert_eq!(ast.children(write).count(), 1);

    let sum = ast.children(write).next().unwrap();
    let slots = ast.node(sum).kind.children();
    assert!(slots[0].is_some());
    assert!(slots[1].is_some());
    assert!(slots[2].is_none());
}

#[test]
fn test_if_without_else_has_empty_third_slot() {
    let mut ast = Ast::new();
    let test = ast.new_const(1, 1);
    let body = ast.new_read(1, "x".to_string());
    let stmt = ast.new_if(1, test, body, None);

    assert_eq!(ast.node(stmt).kind.children(), [Some(test), Some(body), None]);
}

#[test]
fn test_type_annotation_starts_void() {
    let mut ast = read_then_write();
    let ids: Vec<_> = ast
        .ids()
        .filter(|id| ast.node(*id).kind.is_expression())
        .collect();

    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| ast.exp_type(*id) == ExpType::Void));

    ast.set_exp_type(ids[0], ExpType::Integer);
    assert_eq!(ast.node(ids[0]).exp_type(), ExpType::Integer);
}

#[test]
#[should_panic(expected = "malformed tree")]
fn test_statement_in_expression_slot_is_rejected() {
    let mut ast = Ast::new();
    let read = ast.new_read(1, "x".to_string());
    ast.new_write(1, read);
}

#[test]
#[should_panic(expected = "statement node")]
fn test_type_annotation_on_statement_is_rejected() {
    let mut ast = Ast::new();
    let read = ast.new_read(1, "x".to_string());
    ast.set_exp_type(read, ExpType::Integer);
}

#[test]
fn test_tree_listing() {
    let mut ast = Ast::new();
    let x = ast.new_id(1, "x".to_string());
    let zero = ast.new_const(1, 0);
    let test = ast.new_op(1, Operator::Less, zero, x);
    let x_again = ast.new_id(1, "x".to_string());
    let then_part = ast.new_write(1, x_again);
    let else_part = ast.new_read(1, "y".to_string());
    let stmt = ast.new_if(1, test, then_part, Some(else_part));
    ast.set_root(stmt);

    assert_eq!(
        ast.to_string(),
        "If\n  Op: <\n    Const: 0\n    Id: x\n  Write\n    Id: x\n  Read: y\n"
    );
}
