//! Renders a syntax tree back to source text.
//!
//! The output is canonical: every binary operation and every operand of a
//! unary operator is parenthesized, so parsing the printed text rebuilds a
//! tree of the same shape and printing that tree yields the same text.

use std::rc::Rc;

use super::{
    ast::{Command, Expr, SetExpr},
    expressions::ListElement,
    statements::BlockCommand,
    types::VariableKind,
};

const INDENT: &str = "    ";

#[derive(Default)]
pub struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Self {
        Printer::default()
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Prints the statements of a program's root block, without braces.
    pub fn print_program(program: &BlockCommand) -> String {
        let mut printer = Printer::new();
        for command in program.iter() {
            printer.print_command(command);
        }
        printer.finish()
    }

    pub fn expr_to_string(expr: &Expr) -> String {
        let mut out = String::new();
        write_expr(&mut out, expr);
        out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    pub fn print_command(&mut self, command: &Command) {
        match command {
            Command::Block(block) if block.is_declaration() => {
                let declaration = declaration_to_string(block);
                self.line(&declaration);
            }
            Command::Block(block) => {
                self.line("{");
                self.print_block_body(block);
                self.line("}");
            }
            Command::Assign(assign) => {
                let value = Printer::expr_to_string(&assign.value);
                let text = match &assign.target {
                    Some(target) => format!("{} = {};", set_expr_to_string(target), value),
                    // A leading `{` would be read as a block
                    None if matches!(assign.value, Expr::Map(_)) => format!("({});", value),
                    None => format!("{};", value),
                };
                self.line(&text);
            }
            Command::Print(print) => {
                let text = match &print.value {
                    Some(value) => format!("print({});", Printer::expr_to_string(value)),
                    None => String::from("print();"),
                };
                self.line(&text);
            }
            Command::Assert(assert) => {
                let condition = Printer::expr_to_string(&assert.condition);
                let text = match &assert.message {
                    Some(message) => {
                        format!("assert({}, {});", condition, Printer::expr_to_string(message))
                    }
                    None => format!("assert({});", condition),
                };
                self.line(&text);
            }
            Command::If(if_command) => {
                let header = format!("if ({})", Printer::expr_to_string(&if_command.condition));
                let force_braces =
                    if_command.else_body.is_some() && has_dangling_if(&if_command.then_body);
                self.print_body(&header, &if_command.then_body, force_braces);

                if let Some(else_body) = &if_command.else_body {
                    self.print_body("else", else_body, false);
                }
            }
            Command::While(while_command) => {
                let header = format!("while ({})", Printer::expr_to_string(&while_command.condition));
                self.print_body(&header, &while_command.body, false);
            }
            Command::DoWhile(do_while) => {
                self.print_body("do", &do_while.body, false);
                let footer = format!("while ({});", Printer::expr_to_string(&do_while.condition));
                self.line(&footer);
            }
            Command::For(for_command) => {
                let header = format!(
                    "for ({} in {})",
                    for_command.variable.name,
                    Printer::expr_to_string(&for_command.iterable)
                );
                self.print_body(&header, &for_command.body, false);
            }
        }
    }

    fn print_block_body(&mut self, block: &BlockCommand) {
        self.indent += 1;
        for command in block.iter() {
            self.print_command(command);
        }
        self.indent -= 1;
    }

    fn print_body(&mut self, header: &str, body: &Command, force_braces: bool) {
        match body {
            Command::Block(block) if !block.is_declaration() => {
                self.line(&format!("{} {{", header));
                self.print_block_body(block);
                self.line("}");
            }
            _ if force_braces => {
                self.line(&format!("{} {{", header));
                self.indent += 1;
                self.print_command(body);
                self.indent -= 1;
                self.line("}");
            }
            _ => {
                self.line(header);
                self.indent += 1;
                self.print_command(body);
                self.indent -= 1;
            }
        }
    }
}

/// True when an `else` printed after `command` would bind to an inner `if`.
fn has_dangling_if(command: &Command) -> bool {
    match command {
        Command::If(if_command) => match &if_command.else_body {
            Some(else_body) => has_dangling_if(else_body),
            None => true,
        },
        Command::While(while_command) => has_dangling_if(&while_command.body),
        Command::For(for_command) => has_dangling_if(&for_command.body),
        _ => false,
    }
}

fn declaration_to_string(block: &BlockCommand) -> String {
    let mut text = String::new();

    if let Some(first) = block.declares.first() {
        if first.constant {
            text.push_str("final ");
        }
        text.push_str("var ");
        if first.kind == VariableKind::Unsafe {
            text.push('?');
        }
    }

    let names = block
        .declares
        .iter()
        .map(|variable| {
            let initializer = block.iter().find_map(|command| match command {
                Command::Assign(assign) => match &assign.target {
                    Some(SetExpr::Variable(target)) if Rc::ptr_eq(&target.variable, variable) => {
                        Some(&assign.value)
                    }
                    _ => None,
                },
                _ => None,
            });

            match initializer {
                Some(value) => format!("{} = {}", variable.name, Printer::expr_to_string(value)),
                None => variable.name.clone(),
            }
        })
        .collect::<Vec<String>>();

    text.push_str(&names.join(", "));
    text.push(';');
    text
}

fn set_expr_to_string(target: &SetExpr) -> String {
    Printer::expr_to_string(&Expr::from(target.clone()))
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Const(constant) => out.push_str(&constant.value.to_string()),
        Expr::Binary(binary) => {
            out.push('(');
            write_expr(out, &binary.left);
            out.push(' ');
            out.push_str(binary.operator.symbol());
            out.push(' ');
            write_expr(out, &binary.right);
            out.push(')');
        }
        Expr::Unary(unary) => {
            if unary.operator.is_postfix() {
                out.push('(');
                write_expr(out, &unary.operand);
                out.push(')');
                out.push_str(unary.operator.symbol());
            } else {
                out.push_str(unary.operator.symbol());
                out.push('(');
                write_expr(out, &unary.operand);
                out.push(')');
            }
        }
        Expr::Function(function) => {
            out.push_str(function.function.name());
            out.push('(');
            write_expr(out, &function.argument);
            out.push(')');
        }
        Expr::Variable(variable) => out.push_str(variable.name()),
        Expr::Index(index) => {
            write_expr(out, &index.base);
            out.push('[');
            write_expr(out, &index.index);
            out.push(']');
        }
        Expr::List(list) => {
            out.push('[');
            for (i, element) in list.elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_element(out, element);
            }
            out.push(']');
        }
        Expr::Map(map) => {
            out.push('{');
            for (i, entry) in map.entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(out, &entry.key);
                out.push_str(": ");
                write_expr(out, &entry.value);
            }
            out.push('}');
        }
    }
}

fn write_element(out: &mut String, element: &ListElement) {
    match element {
        ListElement::Single(expr) => write_expr(out, expr),
        ListElement::Spread(expr) => {
            out.push_str("...");
            write_expr(out, expr);
        }
        ListElement::If(list_if) => {
            out.push_str("if (");
            write_expr(out, &list_if.condition);
            out.push_str(") ");
            write_element(out, &list_if.then_element);
            if let Some(else_element) = &list_if.else_element {
                out.push_str(" else ");
                write_element(out, else_element);
            }
        }
        ListElement::For(list_for) => {
            out.push_str("for (");
            out.push_str(&list_for.variable.name);
            out.push_str(" in ");
            write_expr(out, &list_for.iterable);
            out.push_str(") ");
            write_element(out, &list_for.element);
        }
    }
}
