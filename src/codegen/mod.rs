//! Code generation for the accumulator machine.
//!
//! This module lowers an analyzed syntax tree into a flat instruction
//! sequence. It handles:
//!
//! - Expressions, with scratch cells for operands that are not leaves
//! - Statements, including forward jumps resolved by backpatching
//! - The textual listing written to `.tm` files

pub mod codegen;
pub mod expr;
pub mod instruction;
pub mod stmt;
