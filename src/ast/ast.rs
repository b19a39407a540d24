use std::fmt::Display;

use super::{
    expressions::{
        BinaryExpr, ConstExpr, FunctionExpr, IndexExpr, ListExpr, MapExpr, UnaryExpr, VariableExpr,
    },
    printer::Printer,
    statements::{
        AssertCommand, AssignCommand, BlockCommand, DoWhileCommand, ForCommand, IfCommand,
        PrintCommand, WhileCommand,
    },
};

/// Command Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum CommandType {
    Block,
    Assign,
    Print,
    Assert,
    If,
    While,
    DoWhile,
    For,
}

/// Command
///
/// A statement of the program. Built once by the parser and never mutated.
#[derive(Debug, Clone)]
pub enum Command {
    Block(BlockCommand),
    Assign(AssignCommand),
    Print(PrintCommand),
    Assert(AssertCommand),
    If(IfCommand),
    While(WhileCommand),
    DoWhile(DoWhileCommand),
    For(ForCommand),
}

impl Command {
    /// Returns the type of the command.
    pub fn get_command_type(&self) -> CommandType {
        match self {
            Command::Block(_) => CommandType::Block,
            Command::Assign(_) => CommandType::Assign,
            Command::Print(_) => CommandType::Print,
            Command::Assert(_) => CommandType::Assert,
            Command::If(_) => CommandType::If,
            Command::While(_) => CommandType::While,
            Command::DoWhile(_) => CommandType::DoWhile,
            Command::For(_) => CommandType::For,
        }
    }

    /// Returns the source line of the command's introducing token.
    pub fn get_line(&self) -> u32 {
        match self {
            Command::Block(command) => command.line,
            Command::Assign(command) => command.line,
            Command::Print(command) => command.line,
            Command::Assert(command) => command.line,
            Command::If(command) => command.line,
            Command::While(command) => command.line,
            Command::DoWhile(command) => command.line,
            Command::For(command) => command.line,
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut printer = Printer::new();
        printer.print_command(self);
        write!(f, "{}", printer.finish().trim_end())
    }
}

/// Expression Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ExprType {
    Const,
    Binary,
    Unary,
    Function,
    Variable,
    Index,
    List,
    Map,
}

impl Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Expression
#[derive(Debug, Clone)]
pub enum Expr {
    Const(ConstExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Function(FunctionExpr),
    Variable(VariableExpr),
    Index(IndexExpr),
    List(ListExpr),
    Map(MapExpr),
}

impl Expr {
    /// Returns the expression type of the expression.
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Const(_) => ExprType::Const,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Function(_) => ExprType::Function,
            Expr::Variable(_) => ExprType::Variable,
            Expr::Index(_) => ExprType::Index,
            Expr::List(_) => ExprType::List,
            Expr::Map(_) => ExprType::Map,
        }
    }

    /// Returns the line recorded when the expression was built.
    pub fn get_line(&self) -> u32 {
        match self {
            Expr::Const(expr) => expr.line,
            Expr::Binary(expr) => expr.line,
            Expr::Unary(expr) => expr.line,
            Expr::Function(expr) => expr.line,
            Expr::Variable(expr) => expr.line,
            Expr::Index(expr) => expr.line,
            Expr::List(expr) => expr.line,
            Expr::Map(expr) => expr.line,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Printer::expr_to_string(self))
    }
}

/// Assignable Expression
///
/// The expressions that may appear on the left of `=`.
#[derive(Debug, Clone)]
pub enum SetExpr {
    Variable(VariableExpr),
    Index(IndexExpr),
}

impl SetExpr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            SetExpr::Variable(_) => ExprType::Variable,
            SetExpr::Index(_) => ExprType::Index,
        }
    }

    pub fn get_line(&self) -> u32 {
        match self {
            SetExpr::Variable(expr) => expr.line,
            SetExpr::Index(expr) => expr.line,
        }
    }
}

impl TryFrom<Expr> for SetExpr {
    /// The expression is handed back when it cannot be assigned to.
    type Error = Expr;

    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Variable(variable) => Ok(SetExpr::Variable(variable)),
            Expr::Index(index) => Ok(SetExpr::Index(index)),
            other => Err(other),
        }
    }
}

impl From<SetExpr> for Expr {
    fn from(target: SetExpr) -> Self {
        match target {
            SetExpr::Variable(variable) => Expr::Variable(variable),
            SetExpr::Index(index) => Expr::Index(index),
        }
    }
}
