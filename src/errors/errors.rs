use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
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

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::LexicalError { .. } => "LexicalError",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndeclaredName { .. } => "UndeclaredName",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LexicalError { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "is a closing `)`, `]`, `}` or `\"` missing?",
            )),
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::DuplicateDeclaration { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` already declared, assign to it instead",
                variable
            )),
            ErrorImpl::UndeclaredName { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` not declared, add `var {};` before its first use",
                variable, variable
            )),
            ErrorImpl::InvalidAssignmentTarget { kind } => ErrorTip::Suggestion(format!(
                "Cannot assign to {}, only variables and indexed elements can be assigned",
                kind
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "At most {} nested expressions, statements or list clauses are allowed",
                limit
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
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
    #[error("Invalid lexeme [{token}]")]
    LexicalError { token: String },
    #[error("Unexpected end of file")]
    UnexpectedEndOfInput,
    #[error("Unexpected lexeme [{token}]")]
    UnexpectedToken { token: String },
    #[error("Duplicate declaration [{variable}]")]
    DuplicateDeclaration { variable: String },
    #[error("Undeclared name [{variable}]")]
    UndeclaredName { variable: String },
    #[error("Invalid assignment target [{kind}]")]
    InvalidAssignmentTarget { kind: String },
    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
