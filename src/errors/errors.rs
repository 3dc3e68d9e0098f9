use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A positioned compiler error.
///
/// Scanner and parser failures are returned as a single `Error`; type errors
/// found by the analyzer are accumulated as a list of them (the diagnostics).
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// Source line the error was reported at.
    pub fn line(&self) -> u32 {
        self.position.0
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Whether the error was produced by the type checker.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::OpAppliedToNonInteger
                | ErrorImpl::IfTestNotBoolean
                | ErrorImpl::RepeatTestNotBoolean
                | ErrorImpl::AssignmentOfNonInteger
                | ErrorImpl::WriteOfNonInteger
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::OpAppliedToNonInteger => "TypeError",
            ErrorImpl::IfTestNotBoolean => "TypeError",
            ErrorImpl::RepeatTestNotBoolean => "TypeError",
            ErrorImpl::AssignmentOfNonInteger => "TypeError",
            ErrorImpl::WriteOfNonInteger => "TypeError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Comment opened with `{` is never closed"))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            type_error => ErrorTip::Suggestion(type_error.to_string()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.position.0, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Type errors, recorded as diagnostics by the analyzer
    #[error("Op applied to non-integer")]
    OpAppliedToNonInteger,
    #[error("if test is not Boolean")]
    IfTestNotBoolean,
    #[error("repeat test is not Boolean")]
    RepeatTestNotBoolean,
    #[error("assignment of non-integer value")]
    AssignmentOfNonInteger,
    #[error("write of non-integer value")]
    WriteOfNonInteger,
}

/// Internal-consistency failures of the code generator.
///
/// None of these can happen when the generator is fed the tree and symbol
/// table of a diagnostic-free analysis; seeing one means a caller broke that
/// contract or the generator itself has a bug.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("variable {name:?} was never resolved during analysis (line {line})")]
    UnknownVariable { name: String, line: u32 },
    #[error("expression at line {line} has no type; was the tree analyzed?")]
    UnanalyzedExpression { line: u32 },
    #[error("instruction at address {address} is not a jump placeholder")]
    NotAJump { address: usize },
    #[error("jump placeholder at address {address} was never backpatched")]
    UnpatchedJump { address: usize },
}

/// Runtime failures of the companion machine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VmError {
    #[error("division by zero at address {address}")]
    DivisionByZero { address: usize },
    #[error("read at address {address} with no input left")]
    InputExhausted { address: usize },
    #[error("jump or fall-through to address {address} outside the program")]
    AddressOutOfRange { address: usize },
    #[error("memory location {location} outside the data area at address {address}")]
    MemoryOutOfRange { location: usize, address: usize },
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize },
}

/// Result of the whole pipeline when a program cannot be compiled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("syntax error at {0}")]
    Syntax(Error),
    #[error("{} type error(s)", .0.len())]
    Semantic(Vec<Error>),
    #[error("internal error: {0}")]
    Codegen(#[from] CodegenError),
}
