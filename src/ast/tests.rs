//! Unit tests for the syntax tree and its printer.
//!
//! The parser never attaches an `else` to an `if` whose then-branch ends in
//! an else-less `if`, so those trees are built by hand here.

use crate::{
    ast::{
        ast::{Command, CommandType, Expr},
        expressions::ConstExpr,
        printer::Printer,
        statements::{BlockCommand, IfCommand, PrintCommand, WhileCommand},
        types::Literal,
    },
    parser::parser::{parse_source, ParserConfig},
};

fn constant(value: Literal) -> Expr {
    Expr::Const(ConstExpr { value, line: 1 })
}

fn print_number(value: i32) -> Command {
    Command::Print(PrintCommand {
        value: Some(constant(Literal::Number(value))),
        line: 1,
    })
}

fn if_command(condition: bool, then_body: Command, else_body: Option<Command>) -> Command {
    Command::If(IfCommand {
        condition: constant(Literal::Bool(condition)),
        then_body: Box::new(then_body),
        else_body: else_body.map(Box::new),
        line: 1,
    })
}

fn program(body: Vec<Command>) -> BlockCommand {
    BlockCommand {
        body,
        declares: vec![],
        line: 1,
    }
}

/// Parses printed text back and returns its first command.
fn reparse_first(text: &str) -> Command {
    let (_, result) = parse_source(text.to_string(), None, ParserConfig::default());
    match result {
        Ok(program) => program.body[0].clone(),
        Err(error) => panic!("{:?} failed: {}", text, error),
    }
}

#[test]
fn test_print_braces_dangling_if() {
    let inner = if_command(false, print_number(1), None);
    let outer = if_command(true, inner, Some(print_number(2)));

    let text = Printer::print_program(&program(vec![outer]));
    assert_eq!(
        text,
        "if (true) {\n    if (false)\n        print(1);\n}\nelse\n    print(2);\n"
    );

    match reparse_first(&text) {
        Command::If(reparsed) => {
            assert!(reparsed.else_body.is_some());
            match reparsed.then_body.as_ref() {
                Command::Block(block) => match &block.body[0] {
                    Command::If(inner) => assert!(inner.else_body.is_none()),
                    other => panic!("expected an if, got {:?}", other),
                },
                other => panic!("expected a block, got {:?}", other),
            }
        }
        other => panic!("expected an if, got {:?}", other),
    }
}

#[test]
fn test_print_braces_if_nested_in_loop() {
    let looped = Command::While(WhileCommand {
        condition: constant(Literal::Bool(true)),
        body: Box::new(if_command(false, print_number(1), None)),
        line: 1,
    });
    let outer = if_command(true, looped, Some(print_number(2)));

    let text = Printer::print_program(&program(vec![outer]));
    assert!(text.starts_with("if (true) {\n    while (true)\n"));

    match reparse_first(&text) {
        Command::If(reparsed) => assert!(reparsed.else_body.is_some()),
        other => panic!("expected an if, got {:?}", other),
    }
}

#[test]
fn test_print_no_braces_when_inner_if_has_else() {
    let inner = if_command(false, print_number(1), Some(print_number(3)));
    let outer = if_command(true, inner, Some(print_number(2)));

    let text = Printer::print_program(&program(vec![outer]));
    assert_eq!(
        text,
        "if (true)\n    if (false)\n        print(1);\n    else\n        print(3);\nelse\n    print(2);\n"
    );
}

#[test]
fn test_command_display_and_type() {
    let command = if_command(true, print_number(1), None);

    assert_eq!(command.get_command_type(), CommandType::If);
    assert_eq!(command.to_string(), "if (true)\n    print(1);");
}
