//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Operator precedence and associativity
//! - Declarations and name resolution
//! - Control flow statements
//! - List and map literals
//! - Scope modes
//! - Error reporting

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Command, CommandType, Expr, SetExpr},
        expressions::ListElement,
        printer::Printer,
        statements::BlockCommand,
        types::{BinaryOp, FunctionOp, Literal, UnaryOp, VariableKind},
    },
    errors::errors::{Error, ErrorImpl},
    format_error,
    lexer::tokens::{Token, TokenKind, TokenStream},
    MK_TOKEN,
};

use super::{
    parser::{parse, parse_source, Parser, ParserConfig, MAX_NESTING_DEPTH},
    symbols::ScopeMode,
};

fn parse_text(source: &str) -> (Parser, Result<BlockCommand, Error>) {
    parse_source(
        source.to_string(),
        Some("test.ml".to_string()),
        ParserConfig::default(),
    )
}

fn parse_lexical(source: &str) -> Result<BlockCommand, Error> {
    let config = ParserConfig {
        scope_mode: ScopeMode::Lexical,
    };
    parse_source(source.to_string(), Some("test.ml".to_string()), config).1
}

fn parse_ok(source: &str) -> BlockCommand {
    let (_, result) = parse_text(source);
    result.unwrap_or_else(|error| panic!("{} failed: {}", source, format_error(&error)))
}

fn parse_err(source: &str) -> Error {
    let (_, result) = parse_text(source);
    match result {
        Ok(program) => panic!("{} parsed: {:?}", source, program),
        Err(error) => error,
    }
}

fn printed(source: &str) -> String {
    Printer::print_program(&parse_ok(source))
}

/// The value of the last expression statement of `source`.
fn last_expr(source: &str) -> Expr {
    let program = parse_ok(source);
    match program.body.last() {
        Some(Command::Assign(assign)) if assign.target.is_none() => assign.value.clone(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn number(expr: &Expr) -> i32 {
    match expr {
        Expr::Const(constant) => match constant.value {
            Literal::Number(value) => value,
            ref other => panic!("expected a number, got {:?}", other),
        },
        other => panic!("expected a constant, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let program = parse_ok("");

    assert!(program.is_empty());
    assert!(!program.is_declaration());
}

#[test]
fn test_parse_precedence() {
    match last_expr("1 + 2 * 3;") {
        Expr::Binary(add) => {
            assert_eq!(add.operator, BinaryOp::Add);
            assert_eq!(number(&add.left), 1);
            match *add.right {
                Expr::Binary(ref mul) => {
                    assert_eq!(mul.operator, BinaryOp::Mul);
                    assert_eq!(number(&mul.left), 2);
                    assert_eq!(number(&mul.right), 3);
                }
                ref other => panic!("expected a product, got {:?}", other),
            }
        }
        other => panic!("expected a sum, got {:?}", other),
    }
}

#[test]
fn test_parse_additive_is_left_associative() {
    match last_expr("1 - 2 - 3;") {
        Expr::Binary(outer) => {
            assert_eq!(outer.operator, BinaryOp::Sub);
            assert_eq!(number(&outer.right), 3);
            match *outer.left {
                Expr::Binary(ref inner) => {
                    assert_eq!(number(&inner.left), 1);
                    assert_eq!(number(&inner.right), 2);
                }
                ref other => panic!("expected a difference, got {:?}", other),
            }
        }
        other => panic!("expected a difference, got {:?}", other),
    }
}

#[test]
fn test_parse_multiplicative_is_left_associative() {
    assert_eq!(printed("8 / 4 / 2;"), "((8 / 4) / 2);\n");
    assert_eq!(printed("7 % 3 * 2;"), "((7 % 3) * 2);\n");
}

#[test]
fn test_parse_logical_operators() {
    assert_eq!(printed("true && false || true;"), "((true && false) || true);\n");
    assert_eq!(printed("1 < 2 && 3 >= 4;"), "((1 < 2) && (3 >= 4));\n");
}

#[test]
fn test_parse_relational_does_not_chain() {
    let error = parse_err("1 < 2 < 3;");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: "<".to_string()
        }
    );
}

#[test]
fn test_parse_if_null_binds_loosest() {
    assert_eq!(
        printed("var ?a; a ?? 1 && 2;"),
        "var ?a;\n(a ?? (1 && 2));\n"
    );
}

#[test]
fn test_parse_unary_operators() {
    let source = "var x = 0; -x; x++; ++x; x--; !(x < 1);";

    assert_eq!(
        printed(source),
        "var x = 0;\n-(x);\n(x)++;\n++(x);\n(x)--;\n!((x < 1));\n"
    );

    match last_expr("var x = 0; x++;") {
        Expr::Unary(unary) => {
            assert_eq!(unary.operator, UnaryOp::PosInc);
            assert!(matches!(*unary.operand, Expr::Variable(_)));
        }
        other => panic!("expected a postfix increment, got {:?}", other),
    }
}

#[test]
fn test_parse_parenthesized_factor() {
    assert_eq!(printed("(1 + 2) * 3;"), "((1 + 2) * 3);\n");
}

#[test]
fn test_parse_function_call() {
    match last_expr("tostr(length([1, 2]));") {
        Expr::Function(tostr) => {
            assert_eq!(tostr.function, FunctionOp::ToStr);
            match *tostr.argument {
                Expr::Function(ref length) => assert_eq!(length.function, FunctionOp::Length),
                ref other => panic!("expected a call, got {:?}", other),
            }
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_parse_function_requires_parentheses() {
    let error = parse_err("read;");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: ";".to_string()
        }
    );
}

#[test]
fn test_parse_declaration_and_use_share_variable() {
    let program = parse_ok("var x = 1; print(x + 1);");
    assert_eq!(program.len(), 2);

    let declared = match &program.body[0] {
        Command::Block(block) => {
            assert_eq!(block.len(), 1);
            match &block.body[0] {
                Command::Assign(assign) => {
                    assert_eq!(number(&assign.value), 1);
                    match &assign.target {
                        Some(SetExpr::Variable(target)) => Rc::clone(&target.variable),
                        other => panic!("expected a variable target, got {:?}", other),
                    }
                }
                other => panic!("expected an assignment, got {:?}", other),
            }
        }
        other => panic!("expected a declaration block, got {:?}", other),
    };

    match &program.body[1] {
        Command::Print(print) => match &print.value {
            Some(Expr::Binary(binary)) => {
                assert_eq!(binary.operator, BinaryOp::Add);
                match *binary.left {
                    Expr::Variable(ref used) => assert!(Rc::ptr_eq(&used.variable, &declared)),
                    ref other => panic!("expected a variable, got {:?}", other),
                }
                assert_eq!(number(&binary.right), 1);
            }
            other => panic!("expected a sum, got {:?}", other),
        },
        other => panic!("expected a print, got {:?}", other),
    }
}

#[test]
fn test_parse_declaration_without_initializers() {
    let (parser, result) = parse_text("var a, b = 2, c;");
    let program = result.unwrap();

    match &program.body[0] {
        Command::Block(block) => {
            assert_eq!(block.declares.len(), 3);
            assert_eq!(block.len(), 1);
        }
        other => panic!("expected a declaration block, got {:?}", other),
    }

    assert_eq!(parser.symbols().len(), 3);
    assert_eq!(parser.symbols().variables()[2].name, "c");
    assert_eq!(parser.symbols().variables()[2].slot, 2);
}

#[test]
fn test_parse_final_nullable_declaration() {
    let (parser, result) = parse_text("final var ?n = null;");
    assert!(result.is_ok());

    let variable = &parser.symbols().variables()[0];
    assert!(variable.constant);
    assert_eq!(variable.kind, VariableKind::Unsafe);
}

#[test]
fn test_parse_final_requires_var() {
    let error = parse_err("final x = 1;");
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_initializer_sees_new_variable() {
    let program = parse_ok("var x = x;");

    match &program.body[0] {
        Command::Block(block) => match &block.body[0] {
            Command::Assign(assign) => match (&assign.target, &assign.value) {
                (Some(SetExpr::Variable(target)), Expr::Variable(value)) => {
                    assert!(Rc::ptr_eq(&target.variable, &value.variable))
                }
                other => panic!("unexpected assignment {:?}", other),
            },
            other => panic!("expected an assignment, got {:?}", other),
        },
        other => panic!("expected a declaration block, got {:?}", other),
    }
}

#[test]
fn test_parse_undeclared_name() {
    let error = parse_err("var a;\nx = 1;");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UndeclaredName {
            variable: "x".to_string()
        }
    );
    assert_eq!(error.get_position().line(), 2);
    assert_eq!(format_error(&error), "02: Undeclared name [x]");
}

#[test]
fn test_parse_duplicate_declaration() {
    let error = parse_err("var x;\nvar x;");

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert_eq!(error.get_position().line(), 2);
}

#[test]
fn test_parse_invalid_assignment_target() {
    let error = parse_err("1 = 2;");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidAssignmentTarget {
            kind: "Const".to_string()
        }
    );
    assert_eq!(error.get_position().line(), 1);

    let error = parse_err("var a; a + 1 = 2;");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidAssignmentTarget {
            kind: "Binary".to_string()
        }
    );
}

#[test]
fn test_parse_parenthesized_assignment_target() {
    for source in ["var x; (x) = 1;", "var m = [1]; (m[0]) = 2;", "var x; ((x)) = 1;"] {
        let error = parse_err(source);

        assert_eq!(
            error.get_impl(),
            &ErrorImpl::InvalidAssignmentTarget {
                kind: "Parenthesized".to_string()
            },
            "for {:?}",
            source
        );
    }

    // Parentheses are fine on the value side and in plain expression statements
    assert!(parse_text("var x; x = (x); (x);").1.is_ok());
}

#[test]
fn test_parse_indexed_assignment() {
    let program = parse_ok("var m = {\"a\": [1]};\nm[\"a\"][0] = 2;");

    match &program.body[1] {
        Command::Assign(assign) => {
            assert_eq!(assign.line, 2);
            match &assign.target {
                Some(SetExpr::Index(index)) => {
                    assert_eq!(number(&index.index), 0);
                    assert!(matches!(*index.base, Expr::Index(_)));
                }
                other => panic!("expected an indexed target, got {:?}", other),
            }
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_print_without_value() {
    let program = parse_ok("print();");

    match &program.body[0] {
        Command::Print(print) => assert!(print.value.is_none()),
        other => panic!("expected a print, got {:?}", other),
    }
}

#[test]
fn test_parse_assert_with_message() {
    let program = parse_ok("assert(1 < 2, \"order\");");

    match &program.body[0] {
        Command::Assert(assert) => {
            assert!(matches!(assert.condition, Expr::Binary(_)));
            match &assert.message {
                Some(Expr::Const(message)) => {
                    assert_eq!(message.value, Literal::Text("order".to_string()))
                }
                other => panic!("expected a text message, got {:?}", other),
            }
        }
        other => panic!("expected an assert, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_binds_to_nearest_if() {
    let program = parse_ok("var a; if (a) if (a) print(1); else print(2);");

    match &program.body[1] {
        Command::If(outer) => {
            assert!(outer.else_body.is_none());
            match outer.then_body.as_ref() {
                Command::If(inner) => assert!(inner.else_body.is_some()),
                other => panic!("expected an if, got {:?}", other),
            }
        }
        other => panic!("expected an if, got {:?}", other),
    }
}

#[test]
fn test_parse_while_with_block() {
    let program = parse_ok("var i = 0;\nwhile (i < 3) {\n    print(i);\n    i = i + 1;\n}");

    match &program.body[1] {
        Command::While(while_command) => {
            assert_eq!(while_command.line, 2);
            match while_command.body.as_ref() {
                Command::Block(block) => {
                    assert_eq!(block.len(), 2);
                    assert!(!block.is_declaration());
                }
                other => panic!("expected a block, got {:?}", other),
            }
        }
        other => panic!("expected a while, got {:?}", other),
    }
}

#[test]
fn test_parse_do_while() {
    let program = parse_ok("var i = 0; do i++; while (i < 3);");

    match &program.body[1] {
        Command::DoWhile(do_while) => {
            assert!(matches!(do_while.body.as_ref(), Command::Assign(_)));
            assert!(matches!(do_while.condition, Expr::Binary(_)));
        }
        other => panic!("expected a do-while, got {:?}", other),
    }
}

#[test]
fn test_parse_do_while_requires_semicolon() {
    let error = parse_err("var i = 0; do i++; while (i < 3)");
    assert_eq!(error.get_impl(), &ErrorImpl::UnexpectedEndOfInput);
}

#[test]
fn test_parse_for_each() {
    let (parser, result) = parse_text("for (i in [1, 2]) print(i);");
    let program = result.unwrap();

    match &program.body[0] {
        Command::For(for_command) => {
            assert_eq!(for_command.variable.name, "i");
            assert_eq!(for_command.variable.kind, VariableKind::Unsafe);
            assert!(!for_command.variable.constant);
        }
        other => panic!("expected a for, got {:?}", other),
    }
    assert_eq!(parser.symbols().len(), 1);
}

#[test]
fn test_parse_flat_loops_share_loop_variable() {
    let (parser, result) = parse_text("for (i in [1]) print(i); for (i in [2]) print(i);");
    let program = result.unwrap();

    match (&program.body[0], &program.body[1]) {
        (Command::For(first), Command::For(second)) => {
            assert!(Rc::ptr_eq(&first.variable, &second.variable))
        }
        other => panic!("expected two loops, got {:?}", other),
    }
    assert_eq!(parser.symbols().len(), 1);
}

#[test]
fn test_parse_loop_over_constant_name() {
    let error = parse_err("final var i = 1;\nfor (i in [1]) print(i);");

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert_eq!(error.get_position().line(), 2);
}

#[test]
fn test_parse_for_iterable_cannot_use_loop_variable() {
    let error = parse_err("for (i in [i]) print(i);");
    assert_eq!(error.get_error_name(), "UndeclaredName");
}

#[test]
fn test_parse_list_elements() {
    match last_expr("var l = [1]; [0, ...l, if (true) 1 else 2, for (v in l) v * 2];") {
        Expr::List(list) => {
            assert_eq!(list.elements.len(), 4);
            assert!(matches!(list.elements[0], ListElement::Single(_)));
            assert!(matches!(list.elements[1], ListElement::Spread(Expr::Variable(_))));
            match &list.elements[2] {
                ListElement::If(list_if) => assert!(list_if.else_element.is_some()),
                other => panic!("expected a conditional element, got {:?}", other),
            }
            match &list.elements[3] {
                ListElement::For(list_for) => {
                    assert_eq!(list_for.variable.name, "v");
                    assert!(matches!(*list_for.element, ListElement::Single(Expr::Binary(_))));
                }
                other => panic!("expected a comprehension, got {:?}", other),
            }
        }
        other => panic!("expected a list, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_list_and_map() {
    assert_eq!(printed("var l = [], m = {};"), "var l = [], m = {};\n");
}

#[test]
fn test_parse_map_statement() {
    let program = parse_ok("{1: \"one\", 2: \"two\"};");

    match &program.body[0] {
        Command::Assign(assign) => match &assign.value {
            Expr::Map(map) => assert_eq!(map.entries.len(), 2),
            other => panic!("expected a map, got {:?}", other),
        },
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_map_requires_colon() {
    let error = parse_err("var m = {1, 2};");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: ",".to_string()
        }
    );
}

#[test]
fn test_parse_lexical_mode_allows_shadowing() {
    let source = "var x = 1;\nif (true) {\n    var x = 2;\n    print(x);\n}\nprint(x);";

    let program = parse_lexical(source).unwrap();
    let (inner, outer) = match (&program.body[1], &program.body[2]) {
        (Command::If(if_command), Command::Print(print)) => {
            let inner = match if_command.then_body.as_ref() {
                Command::Block(block) => match &block.body[1] {
                    Command::Print(print) => print.value.clone(),
                    other => panic!("expected a print, got {:?}", other),
                },
                other => panic!("expected a block, got {:?}", other),
            };
            (inner, print.value.clone())
        }
        other => panic!("unexpected commands {:?}", other),
    };

    match (inner, outer) {
        (Some(Expr::Variable(inner)), Some(Expr::Variable(outer))) => {
            assert_eq!(inner.variable.line, 3);
            assert_eq!(outer.variable.line, 1);
            assert!(!Rc::ptr_eq(&inner.variable, &outer.variable));
        }
        other => panic!("expected two variable reads, got {:?}", other),
    }

    let error = parse_err(source);
    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert_eq!(error.get_position().line(), 3);
}

#[test]
fn test_parse_lexical_mode_scopes_end_with_block() {
    let source = "if (true) { var t = 1; } print(t);";

    let error = parse_lexical(source).unwrap_err();
    assert_eq!(error.get_error_name(), "UndeclaredName");

    // Flat mode keeps the name visible after the block
    assert!(parse_text(source).1.is_ok());
}

#[test]
fn test_parse_lexical_loops_get_fresh_variables() {
    let config = ParserConfig {
        scope_mode: ScopeMode::Lexical,
    };
    let (parser, result) = parse_source(
        "for (i in [1]) print(i); for (i in [2]) print(i);".to_string(),
        None,
        config,
    );

    assert!(result.is_ok());
    assert_eq!(parser.symbols().mode(), ScopeMode::Lexical);
    assert_eq!(parser.symbols().len(), 2);
    assert_eq!(parser.symbols().depth(), 1);
}

#[test]
fn test_parse_lexical_error_from_invalid_lexeme() {
    let error = parse_err("var x = #;");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::LexicalError {
            token: "#".to_string()
        }
    );
}

#[test]
fn test_parse_number_overflow_is_lexical_error() {
    let error = parse_err("print(99999999999);");
    assert_eq!(error.get_error_name(), "LexicalError");
}

#[test]
fn test_parse_unexpected_end_of_input() {
    assert_eq!(parse_err("print(1").get_impl(), &ErrorImpl::UnexpectedEndOfInput);
    assert_eq!(parse_err("print(\"abc").get_impl(), &ErrorImpl::UnexpectedEndOfInput);
    assert_eq!(parse_err("while (true) {").get_impl(), &ErrorImpl::UnexpectedEndOfInput);
}

#[test]
fn test_parse_unexpected_token() {
    let error = parse_err("var x = 1 +;");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: ";".to_string()
        }
    );

    let error = parse_err("else;");
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: "else".to_string()
        }
    );
}

#[test]
fn test_parse_stops_at_first_error() {
    let error = parse_err("var x;\nvar x;\ny = 1;");

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert_eq!(error.get_position().line(), 2);
}

#[test]
fn test_parse_command_lines() {
    let program = parse_ok("var a = 1;\n\nprint(a);\nassert(a);");

    let lines = program.iter().map(Command::get_line).collect::<Vec<u32>>();
    assert_eq!(lines, vec![1, 3, 4]);

    let types = program
        .iter()
        .map(Command::get_command_type)
        .collect::<Vec<CommandType>>();
    assert_eq!(
        types,
        vec![CommandType::Block, CommandType::Print, CommandType::Assert]
    );
}

#[test]
fn test_parse_default_mode_is_flat() {
    let (parser, _) = parse_text("");
    assert_eq!(parser.symbols().mode(), ScopeMode::Flat);
}

#[test]
fn test_parse_deep_parentheses_fail_cleanly() {
    let depth = 10_000;
    let source = format!("print({}1{});", "(".repeat(depth), ")".repeat(depth));

    let error = parse_err(&source);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );
    assert_eq!(format_error(&error), "01: Nesting deeper than 256 levels");
}

#[test]
fn test_parse_deep_statements_fail_cleanly() {
    let source = format!("{}print(1);", "if (true) ".repeat(10_000));
    assert_eq!(parse_err(&source).get_error_name(), "NestingTooDeep");

    let source = format!("{}print(1);{}", "while (true) {".repeat(10_000), "}".repeat(10_000));
    assert_eq!(parse_err(&source).get_error_name(), "NestingTooDeep");
}

#[test]
fn test_parse_deep_list_clauses_fail_cleanly() {
    let source = format!("[{}1];", "if (true) ".repeat(10_000));
    assert_eq!(parse_err(&source).get_error_name(), "NestingTooDeep");
}

#[test]
fn test_parse_nesting_below_limit() {
    let depth = 100;
    let source = format!("print({}1{});", "(".repeat(depth), ")".repeat(depth));
    assert!(parse_text(&source).1.is_ok());

    let source = format!("{}print(1);", "if (true) ".repeat(100));
    assert!(parse_text(&source).1.is_ok());
}

#[test]
fn test_parse_token_stream() {
    let tokens = vec![
        MK_TOKEN!(TokenKind::Number, "1".to_string(), 1),
        MK_TOKEN!(TokenKind::Plus, "+".to_string(), 1),
        MK_TOKEN!(TokenKind::Number, "2".to_string(), 2),
        MK_TOKEN!(TokenKind::Star, "*".to_string(), 2),
        MK_TOKEN!(TokenKind::Number, "3".to_string(), 2),
        MK_TOKEN!(TokenKind::Semicolon, ";".to_string(), 2),
    ];

    let (_, result) = parse(TokenStream::new(tokens), Rc::new("tokens".to_string()));
    let program = result.unwrap();

    match &program.body[0] {
        Command::Assign(assign) => match &assign.value {
            Expr::Binary(add) => {
                assert_eq!(add.operator, BinaryOp::Add);
                // Stamped with the line reached after reading `+`
                assert_eq!(add.line, 2);
                assert!(matches!(*add.right, Expr::Binary(_)));
            }
            other => panic!("expected a sum, got {:?}", other),
        },
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_token_stream_reports_position() {
    let tokens = vec![
        MK_TOKEN!(TokenKind::Name, "ghost".to_string(), 7),
        MK_TOKEN!(TokenKind::Semicolon, ";".to_string(), 7),
    ];

    let (_, result) = parse(TokenStream::new(tokens), Rc::new("tokens".to_string()));
    let error = result.unwrap_err();

    assert_eq!(error.get_error_name(), "UndeclaredName");
    assert_eq!(error.get_position().to_string(), "tokens:7");
}
