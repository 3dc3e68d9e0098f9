//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{CodegenError, CompileError, Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.tny".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(!error.is_type_error());
}

#[test]
fn test_error_line() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "then".to_string(),
        },
        Position(42, Rc::new("test.tny".to_string())),
    );

    assert_eq!(error.line(), 42);
    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_type_error_messages() {
    let cases = [
        (ErrorImpl::OpAppliedToNonInteger, "Op applied to non-integer"),
        (ErrorImpl::IfTestNotBoolean, "if test is not Boolean"),
        (ErrorImpl::RepeatTestNotBoolean, "repeat test is not Boolean"),
        (ErrorImpl::AssignmentOfNonInteger, "assignment of non-integer value"),
        (ErrorImpl::WriteOfNonInteger, "write of non-integer value"),
    ];

    for (kind, message) in cases {
        let error = Error::new(kind, Position(3, Rc::new("test.tny".to_string())));
        assert!(error.is_type_error());
        assert_eq!(error.get_error_name(), "TypeError");
        assert_eq!(error.to_string(), format!("line 3: {}", message));
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        Position(1, Rc::new("test.tny".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(format!("{}", error.get_tip()), "");
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999".to_string(),
        },
        Position(1, Rc::new("test.tny".to_string())),
    );

    assert_eq!(
        format!("{}", error.get_tip()),
        "Invalid number: `99999999999`, is it above the integer limit?"
    );
}

#[test]
fn test_compile_error_from_codegen() {
    let error: CompileError = CodegenError::UnpatchedJump { address: 4 }.into();
    assert_eq!(
        error.to_string(),
        "internal error: jump placeholder at address 4 was never backpatched"
    );
}
