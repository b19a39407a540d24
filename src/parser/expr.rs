use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, ConstExpr, FunctionExpr, IndexExpr, ListElement, ListExpr, ListFor, ListIf,
            MapEntry, MapExpr, UnaryExpr, VariableExpr,
        },
        types::{BinaryOp, Literal},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    lookups::{
        ADDITIVE_LOOKUP, FUNCTION_LOOKUP, LOGICAL_LOOKUP, MULTIPLICATIVE_LOOKUP, POSTFIX_LOOKUP,
        PREFIX_LOOKUP, RELATIONAL_LOOKUP,
    },
    parser::Parser,
};

fn binary(left: Expr, operator: BinaryOp, right: Expr, line: u32) -> Expr {
    Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        line,
    })
}

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.nested(parse_if_null)
}

// <expr> ::= <cond> [ '??' <cond> ]
fn parse_if_null(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_cond(parser)?;

    if parser.current_token_kind() != TokenKind::IfNull {
        return Ok(left);
    }

    parser.advance();
    let line = parser.current_line();
    let right = parse_cond(parser)?;

    Ok(binary(left, BinaryOp::IfNull, right, line))
}

// <cond> ::= <rel> { ( '&&' | '||' ) <rel> }
pub fn parse_cond(parser: &mut Parser) -> Result<Expr, Error> {
    let mut left = parse_rel(parser)?;

    while let Some(operator) = LOGICAL_LOOKUP.get(&parser.current_token_kind()).copied() {
        parser.advance();
        let line = parser.current_line();
        let right = parse_rel(parser)?;
        left = binary(left, operator, right, line);
    }

    Ok(left)
}

/// Relational operators do not chain: `a < b < c` stops after `a < b` and
/// leaves `<` to the caller, which rejects it.
pub fn parse_rel(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_arith(parser)?;

    match RELATIONAL_LOOKUP.get(&parser.current_token_kind()).copied() {
        Some(operator) => {
            parser.advance();
            let line = parser.current_line();
            let right = parse_arith(parser)?;
            Ok(binary(left, operator, right, line))
        }
        None => Ok(left),
    }
}

// <arith> ::= <term> { ( '+' | '-' ) <term> }
pub fn parse_arith(parser: &mut Parser) -> Result<Expr, Error> {
    let mut left = parse_term(parser)?;

    while let Some(operator) = ADDITIVE_LOOKUP.get(&parser.current_token_kind()).copied() {
        parser.advance();
        let line = parser.current_line();
        let right = parse_term(parser)?;
        left = binary(left, operator, right, line);
    }

    Ok(left)
}

// <term> ::= <prefix> { ( '*' | '/' | '%' ) <prefix> }
pub fn parse_term(parser: &mut Parser) -> Result<Expr, Error> {
    let mut left = parse_prefix(parser)?;

    while let Some(operator) = MULTIPLICATIVE_LOOKUP.get(&parser.current_token_kind()).copied() {
        parser.advance();
        let line = parser.current_line();
        let right = parse_prefix(parser)?;
        left = binary(left, operator, right, line);
    }

    Ok(left)
}

// <prefix> ::= [ '!' | '-' | '++' | '--' ] <factor>
pub fn parse_prefix(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = match PREFIX_LOOKUP.get(&parser.current_token_kind()).copied() {
        Some(operator) => operator,
        None => return parse_factor(parser),
    };

    parser.advance();
    let line = parser.current_line();
    let operand = parse_factor(parser)?;

    Ok(Expr::Unary(UnaryExpr {
        operator,
        operand: Box::new(operand),
        line,
    }))
}

// <factor> ::= ( '(' <expr> ')' | <rvalue> ) [ '++' | '--' ]
pub fn parse_factor(parser: &mut Parser) -> Result<Expr, Error> {
    let value = if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();
        let value = parse_expr(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        value
    } else {
        parse_rvalue(parser)?
    };

    match POSTFIX_LOOKUP.get(&parser.current_token_kind()).copied() {
        Some(operator) => {
            parser.advance();
            let line = parser.current_line();
            Ok(Expr::Unary(UnaryExpr {
                operator,
                operand: Box::new(value),
                line,
            }))
        }
        None => Ok(value),
    }
}

pub fn parse_rvalue(parser: &mut Parser) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();

    match parser.get_rvalue_lookup().get(&token_kind).copied() {
        Some(handler) => handler(parser),
        None => Err(parser.unexpected()),
    }
}

pub fn parse_const_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();

    let value = match token.kind {
        TokenKind::Null => Literal::Null,
        TokenKind::False => Literal::Bool(false),
        TokenKind::True => Literal::Bool(true),
        TokenKind::Number => match token.value.parse::<i32>() {
            Ok(number) => Literal::Number(number),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::LexicalError { token: token.value },
                    Position(token.line, parser.get_file()),
                ))
            }
        },
        TokenKind::Text => Literal::Text(token.value),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                Position(token.line, parser.get_file()),
            ))
        }
    };

    Ok(Expr::Const(ConstExpr {
        value,
        line: token.line,
    }))
}

// <function> ::= <name> '(' <expr> ')'
pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();

    let function = match FUNCTION_LOOKUP.get(&token.kind).copied() {
        Some(function) => function,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                Position(token.line, parser.get_file()),
            ))
        }
    };

    parser.expect(TokenKind::OpenParen)?;
    let argument = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Function(FunctionExpr {
        function,
        argument: Box::new(argument),
        line: token.line,
    }))
}

/// Parses a variable reference followed by any number of subscripts.
///
/// The name is resolved as soon as it is read, so an undeclared name is
/// reported on its own line.
pub fn parse_lvalue_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let name = parser.expect(TokenKind::Name)?;
    let variable = parser.resolve(&name)?;

    let mut expr = Expr::Variable(VariableExpr {
        variable,
        line: name.line,
    });

    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        let line = parser.current_line();
        let index = parse_expr(parser)?;
        parser.expect(TokenKind::CloseBracket)?;

        expr = Expr::Index(IndexExpr {
            base: Box::new(expr),
            index: Box::new(index),
            line,
        });
    }

    Ok(expr)
}

// <list> ::= '[' [ <element> { ',' <element> } ] ']'
pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?;
    let mut elements = vec![];

    if parser.current_token_kind() != TokenKind::CloseBracket {
        loop {
            elements.push(parse_list_element(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::List(ListExpr {
        elements,
        line: start.line,
    }))
}

pub fn parse_list_element(parser: &mut Parser) -> Result<ListElement, Error> {
    parser.nested(parse_list_clause)
}

fn parse_list_clause(parser: &mut Parser) -> Result<ListElement, Error> {
    match parser.current_token_kind() {
        TokenKind::Spread => {
            parser.advance();
            Ok(ListElement::Spread(parse_expr(parser)?))
        }
        TokenKind::If => {
            let start = parser.advance();

            parser.expect(TokenKind::OpenParen)?;
            let condition = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;

            let then_element = parse_list_element(parser)?;
            let else_element = if parser.current_token_kind() == TokenKind::Else {
                parser.advance();
                Some(Box::new(parse_list_element(parser)?))
            } else {
                None
            };

            Ok(ListElement::If(ListIf {
                condition,
                then_element: Box::new(then_element),
                else_element,
                line: start.line,
            }))
        }
        TokenKind::For => {
            let start = parser.advance();

            parser.expect(TokenKind::OpenParen)?;
            let name = parser.expect(TokenKind::Name)?;
            parser.expect(TokenKind::In)?;
            let iterable = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;

            // The iterable is outside the comprehension's scope
            let (variable, element) = parser.with_loop_variable(&name, parse_list_element)?;

            Ok(ListElement::For(ListFor {
                variable,
                iterable,
                element: Box::new(element),
                line: start.line,
            }))
        }
        _ => Ok(ListElement::Single(parse_expr(parser)?)),
    }
}

// <map> ::= '{' [ <expr> ':' <expr> { ',' <expr> ':' <expr> } ] '}'
pub fn parse_map_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?;
    let mut entries = vec![];

    if parser.current_token_kind() != TokenKind::CloseCurly {
        loop {
            let key = parse_expr(parser)?;
            parser.expect(TokenKind::Colon)?;
            let value = parse_expr(parser)?;
            entries.push(MapEntry { key, value });

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::Map(MapExpr {
        entries,
        line: start.line,
    }))
}
