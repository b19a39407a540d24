//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn position(line: u32) -> Position {
    Position(line, Rc::new("test.ml".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::LexicalError {
            token: "@".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "LexicalError");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: ")".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "else".to_string(),
        },
        position(1),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.to_string(), "Unexpected lexeme [else]");
}

#[test]
fn test_unexpected_end_of_input_error() {
    let error = Error::new(ErrorImpl::UnexpectedEndOfInput, position(1));

    assert_eq!(error.get_error_name(), "UnexpectedEndOfInput");
    assert_eq!(error.to_string(), "Unexpected end of file");
}

#[test]
fn test_undeclared_name_error() {
    let error = Error::new(
        ErrorImpl::UndeclaredName {
            variable: "foo".to_string(),
        },
        position(1),
    );

    assert_eq!(error.get_error_name(), "UndeclaredName");
    assert_eq!(error.to_string(), "Undeclared name [foo]");
}

#[test]
fn test_duplicate_declaration_error() {
    let error = Error::new(
        ErrorImpl::DuplicateDeclaration {
            variable: "x".to_string(),
        },
        position(1),
    );

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
}

#[test]
fn test_invalid_assignment_target_error() {
    let error = Error::new(
        ErrorImpl::InvalidAssignmentTarget {
            kind: "Const".to_string(),
        },
        position(1),
    );

    assert_eq!(error.get_error_name(), "InvalidAssignmentTarget");
    assert_eq!(error.to_string(), "Invalid assignment target [Const]");
}

#[test]
fn test_nesting_too_deep_error() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 256 }, position(1));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.to_string(), "Nesting deeper than 256 levels");
    assert!(matches!(error.get_tip(), ErrorTip::Suggestion(_)));
}

#[test]
fn test_error_impl_accessor() {
    let error = Error::new(ErrorImpl::UnexpectedEndOfInput, position(5));
    assert_eq!(error.get_impl(), &ErrorImpl::UnexpectedEndOfInput);
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::LexicalError {
            token: "@".to_string(),
        },
        position(1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        position(1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
