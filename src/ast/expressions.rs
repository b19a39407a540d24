use std::rc::Rc;

use super::{
    ast::Expr,
    types::{BinaryOp, FunctionOp, Literal, UnaryOp, Variable},
};

// LITERALS

/// Constant Expression
/// A literal `null`, boolean, number or text.
#[derive(Debug, Clone)]
pub struct ConstExpr {
    pub value: Literal,
    pub line: u32,
}

// COMPLEX

/// Binary Expression
/// Represents a binary operation between two expressions.
///
/// This includes the if-null operator (`a ?? b`) and the logical operators,
/// which are not short-circuited at parse time.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOp,
    pub right: Box<Expr>,
    pub line: u32,
}

/// Unary Expression
/// Prefix (`!x`, `-x`, `++x`, `--x`) or postfix (`x++`, `x--`) operation.
#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<Expr>,
    pub line: u32,
}

/// Function Expression
/// Call of a built-in function with its single argument.
#[derive(Debug, Clone)]
pub struct FunctionExpr {
    pub function: FunctionOp,
    pub argument: Box<Expr>,
    pub line: u32,
}

/// Variable Expression
/// A resolved reference to a declared variable.
#[derive(Debug, Clone)]
pub struct VariableExpr {
    pub variable: Rc<Variable>,
    pub line: u32,
}

impl VariableExpr {
    pub fn name(&self) -> &str {
        &self.variable.name
    }
}

/// Index Expression
/// Subscript of a list or map (`base[index]`).
#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub base: Box<Expr>,
    pub index: Box<Expr>,
    pub line: u32,
}

/// List Expression
#[derive(Debug, Clone)]
pub struct ListExpr {
    pub elements: Vec<ListElement>,
    pub line: u32,
}

/// One clause of a list literal.
#[derive(Debug, Clone)]
pub enum ListElement {
    /// A plain element.
    Single(Expr),
    /// `...expr`, splices every element of `expr`.
    Spread(Expr),
    /// `if (cond) element [else element]`
    If(ListIf),
    /// `for (name in expr) element`
    For(ListFor),
}

#[derive(Debug, Clone)]
pub struct ListIf {
    pub condition: Expr,
    pub then_element: Box<ListElement>,
    pub else_element: Option<Box<ListElement>>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct ListFor {
    pub variable: Rc<Variable>,
    pub iterable: Expr,
    pub element: Box<ListElement>,
    pub line: u32,
}

/// Map Expression
#[derive(Debug, Clone)]
pub struct MapExpr {
    pub entries: Vec<MapEntry>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct MapEntry {
    pub key: Expr,
    pub value: Expr,
}
