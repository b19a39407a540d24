//! Parser module for building the command tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a tree of commands and expressions. It uses recursive descent
//! with one function per grammar rule and handles:
//!
//! - Statement parsing (declarations, print, assert, control flow)
//! - Expression parsing through seven precedence layers
//! - Name resolution against the symbol table while parsing
//! - Fail-fast error reporting
//!
//! Dispatch on the current token goes through lookup tables keyed by
//! token kind, one for statements and one for rvalues.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod symbols;

#[cfg(test)]
mod tests;
