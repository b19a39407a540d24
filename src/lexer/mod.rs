//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into lexical units for the parser. It handles:
//!
//! - On-demand tokenization using regex patterns (pull model)
//! - Recognition of keywords, names, literals, and operators
//! - Line tracking for diagnostics
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
