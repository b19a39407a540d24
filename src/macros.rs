//! Utility macros for the front end.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for simple tokens
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$line` - The line the token starts on
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), 3);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
        }
    };
}

/// Creates a default lexer handler for fixed-text tokens.
///
/// Generates a handler function that creates a token with the given kind
/// and advances the lexer position by the token's length.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal string value (used for length calculation)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _matched: &str| -> Option<Token> {
            lexer.advance_n($value.len());
            Some(MK_TOKEN!($kind, String::from($value), lexer.line))
        }
    };
}
