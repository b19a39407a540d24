#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::Error;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A source location: line number and file name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }

    pub fn line(&self) -> u32 {
        self.0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

/// Formats an error as the single diagnostic line reported to the user.
///
/// ```text
/// 03: Unexpected lexeme [;]
/// ```
pub fn format_error(error: &Error) -> String {
    let position = error.get_position();
    format!("{:02}: {}", position.line(), error)
}

/// Writes the diagnostic line for `error` to stderr.
pub fn display_error(error: &Error) {
    eprintln!("{}", format_error(error));
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    #[test]
    fn test_format_error_pads_line() {
        let error = Error::new(
            ErrorImpl::UndeclaredName {
                variable: String::from("x"),
            },
            Position(3, Rc::new(String::from("test.ml"))),
        );

        assert_eq!(super::format_error(&error), "03: Undeclared name [x]");
    }

    #[test]
    fn test_format_error_wide_line() {
        let error = Error::new(
            ErrorImpl::UnexpectedEndOfInput,
            Position(120, Rc::new(String::from("test.ml"))),
        );

        assert_eq!(super::format_error(&error), "120: Unexpected end of file");
    }

    #[test]
    fn test_position_display() {
        let position = Position(7, Rc::new(String::from("main.ml")));
        assert_eq!(position.to_string(), "main.ml:7");
        assert_eq!(position.line(), 7);
    }
}
