//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into the arena-backed syntax tree. It uses a Pratt parser for expressions
//! with operator precedence and handles:
//!
//! - Statement sequences joined through sibling links
//! - `if`, `repeat`, assignment, `read` and `write` statements
//! - Comparison, additive and multiplicative expressions
//! - Reporting the first syntax error with its line
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
