//! Semantic analysis module.
//!
//! This module builds the symbol table and type checks the syntax tree in a
//! single traversal. It:
//!
//! - Binds every variable on first use (there are no declarations)
//! - Annotates each expression node with `Integer` or `Boolean`
//! - Records type errors as diagnostics and keeps going
//!
//! Code generation may only run when the resulting diagnostics list is empty;
//! `Analysis::into_symbols` is the gate.

pub mod analyzer;
pub mod symbol_table;
