//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of reserved words, identifiers, numbers, and symbols
//! - Line tracking for error reporting and node line numbers
//! - Brace comments and whitespace handling

pub mod lexer;
pub mod tokens;
