//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source line information
//! - Specific error variants for scanning, parsing and type checking
//! - Internal-consistency errors raised by the code generator
//! - The pipeline-level error returned by `compile`

pub mod errors;

#[cfg(test)]
mod tests;
