//! Parser implementation for building the command tree.
//!
//! This module contains the main Parser struct and the parsing entry
//! points. The parser is a recursive-descent parser with one token of
//! lookahead: each grammar rule is a function over the shared parser, and
//! names are resolved against the symbol table as they are parsed.
//!
//! It maintains lookup tables for:
//! - Statement handlers, keyed by the statement's first token
//! - Rvalue handlers, keyed by the first token of a primary expression

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::{statements::BlockCommand, types::{Variable, VariableKind}},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind, TokenSource},
    },
    Position,
};

use super::{
    lookups::{create_token_lookups, RValueHandler, RValueLookup, StmtHandler, StmtLookup},
    stmt::parse_code,
    symbols::{ScopeMode, SymbolTable},
};

/// Maximum number of nested expressions, statements and list clauses.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parser settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserConfig {
    /// How declarations are scoped. Defaults to [`ScopeMode::Flat`].
    pub scope_mode: ScopeMode,
}

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token source, the single lookahead token, the
/// symbol table and the dispatch tables. The token source is only asked
/// for a new token when the current one is consumed.
pub struct Parser {
    /// Where tokens are pulled from
    source: Box<dyn TokenSource>,
    /// The lookahead token
    current: Token,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Declared variables
    symbols: SymbolTable,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for rvalue parsing handlers
    rvalue_lookup: RValueLookup,
    /// Number of nested rules currently being parsed
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance, pulling the first lookahead token.
    ///
    /// # Arguments
    ///
    /// * `source` - Where tokens are read from
    /// * `file` - Reference-counted string containing the source file name
    /// * `config` - Parser settings
    pub fn new(mut source: Box<dyn TokenSource>, file: Rc<String>, config: ParserConfig) -> Self {
        let current = source.next_token();

        Parser {
            source,
            current,
            file,
            symbols: SymbolTable::new(config.scope_mode),
            stmt_lookup: HashMap::new(),
            rvalue_lookup: HashMap::new(),
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Consumes the current token, pulls the next one and returns the
    /// consumed token.
    pub fn advance(&mut self) -> Token {
        let next = self.source.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Expects a token of the specified kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise the error
    /// describing the current token (see [`Parser::unexpected`]).
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            Err(self.unexpected())
        } else {
            Ok(self.advance())
        }
    }

    /// Builds the error for a current token that fits no grammar rule.
    ///
    /// Malformed lexemes report a lexical error, the end of input reports
    /// an unexpected end of file, anything else an unexpected token.
    pub fn unexpected(&self) -> Error {
        let error = match self.current.kind {
            TokenKind::Invalid => ErrorImpl::LexicalError {
                token: self.current.value.clone(),
            },
            TokenKind::UnexpectedEof | TokenKind::EOF => ErrorImpl::UnexpectedEndOfInput,
            _ => ErrorImpl::UnexpectedToken {
                token: self.current.value.clone(),
            },
        };

        Error::new(error, self.get_position())
    }

    /// Line the token source has read up to.
    pub fn current_line(&self) -> u32 {
        self.source.current_line()
    }

    /// Returns the current position in the source file.
    pub fn get_position(&self) -> Position {
        Position(self.current_line(), Rc::clone(&self.file))
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Declares the variable named by `name`, reporting errors on its line.
    pub fn declare(
        &mut self,
        name: &Token,
        constant: bool,
        kind: VariableKind,
    ) -> Result<Rc<Variable>, Error> {
        let position = Position(name.line, Rc::clone(&self.file));
        self.symbols.declare(&name.value, constant, kind, position)
    }

    /// Resolves the variable named by `name`, reporting errors on its line.
    pub fn resolve(&self, name: &Token) -> Result<Rc<Variable>, Error> {
        self.symbols.resolve(&name.value, Position(name.line, Rc::clone(&self.file)))
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Fails with `NestingTooDeep` once [`MAX_NESTING_DEPTH`] levels are open.
    pub fn nested<T>(&mut self, parse: fn(&mut Parser) -> Result<T, Error>) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Runs `parse` inside a new scope frame.
    pub fn with_scope<T>(&mut self, parse: fn(&mut Parser) -> Result<T, Error>) -> Result<T, Error> {
        self.symbols.push_scope();
        let result = parse(self);
        self.symbols.pop_scope();
        result
    }

    /// Runs `parse` inside a new scope frame holding the loop variable
    /// `name`.
    pub fn with_loop_variable<T>(
        &mut self,
        name: &Token,
        parse: fn(&mut Parser) -> Result<T, Error>,
    ) -> Result<(Rc<Variable>, T), Error> {
        self.symbols.push_scope();

        let position = Position(name.line, Rc::clone(&self.file));
        let result = match self.symbols.declare_loop_variable(&name.value, position) {
            Ok(variable) => parse(self).map(|body| (variable, body)),
            Err(error) => Err(error),
        };

        self.symbols.pop_scope();
        result
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the rvalue lookup table.
    pub fn get_rvalue_lookup(&self) -> &RValueLookup {
        &self.rvalue_lookup
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers an rvalue handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `rvalue_fn` - The handler function for rvalues starting with `kind`
    pub fn rvalue(&mut self, kind: TokenKind, rvalue_fn: RValueHandler) {
        self.rvalue_lookup.insert(kind, rvalue_fn);
    }
}

/// Parses a token source into the program's root block.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses commands until EOF.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with its symbol table after parsing)
/// - Result containing either the root BlockCommand or the first Error
pub fn parse<S: TokenSource + 'static>(
    source: S,
    file: Rc<String>,
) -> (Parser, Result<BlockCommand, Error>) {
    parse_with_config(source, file, ParserConfig::default())
}

/// Same as [`parse`], with explicit settings.
pub fn parse_with_config<S: TokenSource + 'static>(
    source: S,
    file: Rc<String>,
    config: ParserConfig,
) -> (Parser, Result<BlockCommand, Error>) {
    debug!(file = %file, scope_mode = ?config.scope_mode, "parse started");

    let mut parser = Parser::new(Box::new(source), Rc::clone(&file), config);
    create_token_lookups(&mut parser);

    let result = parse_program(&mut parser);

    match &result {
        Ok(block) => debug!(
            commands = block.len(),
            variables = parser.symbols().len(),
            "parse finished"
        ),
        Err(error) => debug!(error = %error, line = error.get_position().line(), "parse failed"),
    }

    (parser, result)
}

/// Tokenizes and parses source text.
pub fn parse_source(
    source: String,
    file: Option<String>,
    config: ParserConfig,
) -> (Parser, Result<BlockCommand, Error>) {
    let lexer = Lexer::new(source, file);
    let file = lexer.get_file();
    parse_with_config(lexer, file, config)
}

// <program> ::= <code> EOF
fn parse_program(parser: &mut Parser) -> Result<BlockCommand, Error> {
    let block = parse_code(parser)?;
    parser.expect(TokenKind::EOF)?;
    Ok(block)
}
