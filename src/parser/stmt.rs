use std::rc::Rc;

use crate::{
    ast::{
        ast::{Command, Expr, SetExpr},
        expressions::VariableExpr,
        statements::{
            AssertCommand, AssignCommand, BlockCommand, DoWhileCommand, ForCommand, IfCommand,
            PrintCommand, WhileCommand,
        },
        types::VariableKind,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    lookups::{is_command_start, is_expr_start},
    parser::Parser,
};

// <code> ::= { <command> }
pub fn parse_code(parser: &mut Parser) -> Result<BlockCommand, Error> {
    let line = parser.current_token().line;
    let mut body = vec![];

    while is_command_start(parser, parser.current_token_kind()) {
        body.push(parse_stmt(parser)?);
    }

    Ok(BlockCommand {
        body,
        declares: vec![],
        line,
    })
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Command, Error> {
    parser.nested(dispatch_stmt)
}

fn dispatch_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let token_kind = parser.current_token_kind();

    if let Some(handler) = parser.get_stmt_lookup().get(&token_kind).copied() {
        return handler(parser);
    }

    if is_expr_start(parser, token_kind) {
        return parse_assign_stmt(parser);
    }

    Err(parser.unexpected())
}

/// Parses a braced body in its own scope, or a single command.
pub fn parse_body(parser: &mut Parser) -> Result<Command, Error> {
    if parser.current_token_kind() != TokenKind::OpenCurly {
        return parse_stmt(parser);
    }

    let start = parser.advance();
    let block = parser.with_scope(parse_code)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Command::Block(BlockCommand {
        line: start.line,
        ..block
    }))
}

/// Parses `[final] var [?] name [= expr] {, name [= expr]} ;`.
///
/// Each name is declared before its initializer is parsed, so the
/// initializer may refer to the variable being declared.
pub fn parse_decl_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let start = parser.advance();

    let constant = start.kind == TokenKind::Final;
    if constant {
        parser.expect(TokenKind::Var)?;
    }

    let kind = if parser.current_token_kind() == TokenKind::Nullable {
        parser.advance();
        VariableKind::Unsafe
    } else {
        VariableKind::Safe
    };

    let mut declares = vec![];
    let mut body = vec![];

    loop {
        let name = parser.expect(TokenKind::Name)?;
        let variable = parser.declare(&name, constant, kind)?;

        if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            let value = parse_expr(parser)?;

            body.push(Command::Assign(AssignCommand {
                target: Some(SetExpr::Variable(VariableExpr {
                    variable: Rc::clone(&variable),
                    line: name.line,
                })),
                value,
                line: name.line,
            }));
        }

        declares.push(variable);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Command::Block(BlockCommand {
        body,
        declares,
        line: start.line,
    }))
}

// <print> ::= 'print' '(' [ <expr> ] ')' ';'
pub fn parse_print_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let start = parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let value = if is_expr_start(parser, parser.current_token_kind()) {
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Command::Print(PrintCommand {
        value,
        line: start.line,
    }))
}

// <assert> ::= 'assert' '(' <expr> [ ',' <expr> ] ')' ';'
pub fn parse_assert_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let start = parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser)?;
    let message = if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Command::Assert(AssertCommand {
        condition,
        message,
        line: start.line,
    }))
}

fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    Ok(condition)
}

// <if> ::= 'if' '(' <expr> ')' <body> [ 'else' <body> ]
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let start = parser.advance();

    let condition = parse_condition(parser)?;
    let then_body = parse_body(parser)?;
    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_body(parser)?))
    } else {
        None
    };

    Ok(Command::If(IfCommand {
        condition,
        then_body: Box::new(then_body),
        else_body,
        line: start.line,
    }))
}

// <while> ::= 'while' '(' <expr> ')' <body>
pub fn parse_while_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let start = parser.advance();

    let condition = parse_condition(parser)?;
    let body = parse_body(parser)?;

    Ok(Command::While(WhileCommand {
        condition,
        body: Box::new(body),
        line: start.line,
    }))
}

// <do-while> ::= 'do' <body> 'while' '(' <expr> ')' ';'
pub fn parse_do_while_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let start = parser.advance();

    let body = parse_body(parser)?;
    parser.expect(TokenKind::While)?;
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Command::DoWhile(DoWhileCommand {
        body: Box::new(body),
        condition,
        line: start.line,
    }))
}

/// Parses `for (name in expr) body`.
///
/// The iterable is parsed before the loop variable exists, so it cannot
/// refer to it.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let start = parser.advance();

    parser.expect(TokenKind::OpenParen)?;
    let name = parser.expect(TokenKind::Name)?;
    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let (variable, body) = parser.with_loop_variable(&name, parse_body)?;

    Ok(Command::For(ForCommand {
        variable,
        iterable,
        body: Box::new(body),
        line: start.line,
    }))
}

/// Parses an expression statement, or an assignment when `=` follows.
pub fn parse_assign_stmt(parser: &mut Parser) -> Result<Command, Error> {
    let line = parser.current_token().line;
    // A variable or subscript that starts with `(` is a parenthesized factor
    let parenthesized = parser.current_token_kind() == TokenKind::OpenParen;
    let expr = parse_expr(parser)?;

    if parser.current_token_kind() != TokenKind::Assignment {
        parser.expect(TokenKind::Semicolon)?;

        return Ok(Command::Assign(AssignCommand {
            target: None,
            value: expr,
            line,
        }));
    }

    let position = parser.get_position();
    parser.advance();

    let target = match SetExpr::try_from(expr) {
        Ok(_) if parenthesized => {
            return Err(Error::new(
                ErrorImpl::InvalidAssignmentTarget {
                    kind: String::from("Parenthesized"),
                },
                position,
            ))
        }
        Ok(target) => target,
        Err(rejected) => {
            return Err(Error::new(
                ErrorImpl::InvalidAssignmentTarget {
                    kind: rejected.get_expr_type().to_string(),
                },
                position,
            ))
        }
    };

    let value = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Command::Assign(AssignCommand {
        target: Some(target),
        value,
        line,
    }))
}
