use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{
        ast::{Command, Expr},
        types::{BinaryOp, FunctionOp, UnaryOp},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser) -> Result<Command, Error>;
pub type RValueHandler = fn(&mut Parser) -> Result<Expr, Error>;

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type RValueLookup = HashMap<TokenKind, RValueHandler>;

lazy_static! {
    pub static ref LOGICAL_LOOKUP: HashMap<TokenKind, BinaryOp> = HashMap::from([
        (TokenKind::And, BinaryOp::And),
        (TokenKind::Or, BinaryOp::Or),
    ]);
    pub static ref RELATIONAL_LOOKUP: HashMap<TokenKind, BinaryOp> = HashMap::from([
        (TokenKind::Less, BinaryOp::LowerThan),
        (TokenKind::Greater, BinaryOp::GreaterThan),
        (TokenKind::LessEquals, BinaryOp::LowerEqual),
        (TokenKind::GreaterEquals, BinaryOp::GreaterEqual),
        (TokenKind::Equals, BinaryOp::Equal),
        (TokenKind::NotEquals, BinaryOp::NotEqual),
    ]);
    pub static ref ADDITIVE_LOOKUP: HashMap<TokenKind, BinaryOp> = HashMap::from([
        (TokenKind::Plus, BinaryOp::Add),
        (TokenKind::Dash, BinaryOp::Sub),
    ]);
    pub static ref MULTIPLICATIVE_LOOKUP: HashMap<TokenKind, BinaryOp> = HashMap::from([
        (TokenKind::Star, BinaryOp::Mul),
        (TokenKind::Slash, BinaryOp::Div),
        (TokenKind::Percent, BinaryOp::Mod),
    ]);
    pub static ref PREFIX_LOOKUP: HashMap<TokenKind, UnaryOp> = HashMap::from([
        (TokenKind::Not, UnaryOp::Not),
        (TokenKind::Dash, UnaryOp::Neg),
        (TokenKind::PlusPlus, UnaryOp::PreInc),
        (TokenKind::MinusMinus, UnaryOp::PreDec),
    ]);
    pub static ref POSTFIX_LOOKUP: HashMap<TokenKind, UnaryOp> = HashMap::from([
        (TokenKind::PlusPlus, UnaryOp::PosInc),
        (TokenKind::MinusMinus, UnaryOp::PosDec),
    ]);
    pub static ref FUNCTION_LOOKUP: HashMap<TokenKind, FunctionOp> = HashMap::from([
        (TokenKind::Read, FunctionOp::Read),
        (TokenKind::Random, FunctionOp::Random),
        (TokenKind::Length, FunctionOp::Length),
        (TokenKind::Keys, FunctionOp::Keys),
        (TokenKind::Values, FunctionOp::Values),
        (TokenKind::ToBool, FunctionOp::ToBool),
        (TokenKind::ToInt, FunctionOp::ToInt),
        (TokenKind::ToStr, FunctionOp::ToStr),
    ]);
}

pub fn create_token_lookups(parser: &mut Parser) {
    // Constants
    parser.rvalue(TokenKind::Null, parse_const_expr);
    parser.rvalue(TokenKind::False, parse_const_expr);
    parser.rvalue(TokenKind::True, parse_const_expr);
    parser.rvalue(TokenKind::Number, parse_const_expr);
    parser.rvalue(TokenKind::Text, parse_const_expr);

    // Built-in functions
    for kind in FUNCTION_LOOKUP.keys() {
        parser.rvalue(*kind, parse_function_expr);
    }

    // Names, lists and maps
    parser.rvalue(TokenKind::Name, parse_lvalue_expr);
    parser.rvalue(TokenKind::OpenBracket, parse_list_expr);
    parser.rvalue(TokenKind::OpenCurly, parse_map_expr);

    // Statements
    parser.stmt(TokenKind::Final, parse_decl_stmt);
    parser.stmt(TokenKind::Var, parse_decl_stmt);
    parser.stmt(TokenKind::Print, parse_print_stmt);
    parser.stmt(TokenKind::Assert, parse_assert_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Do, parse_do_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
}

/// FIRST set of `expr`: a prefix operator, `(`, or anything an rvalue
/// starts with.
pub fn is_expr_start(parser: &Parser, kind: TokenKind) -> bool {
    PREFIX_LOOKUP.contains_key(&kind)
        || kind == TokenKind::OpenParen
        || parser.get_rvalue_lookup().contains_key(&kind)
}

/// FIRST set of a command: a statement keyword or the start of an expression.
pub fn is_command_start(parser: &Parser, kind: TokenKind) -> bool {
    parser.get_stmt_lookup().contains_key(&kind) || is_expr_start(parser, kind)
}
