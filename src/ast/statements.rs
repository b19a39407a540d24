use std::{rc::Rc, slice::Iter};

use super::{
    ast::{Command, Expr, SetExpr},
    types::Variable,
};

/// Block Command
///
/// An ordered sequence of commands. A block produced by a declaration
/// lists the variables it declares in `declares`; every other block leaves
/// it empty.
#[derive(Debug, Clone)]
pub struct BlockCommand {
    pub body: Vec<Command>,
    pub declares: Vec<Rc<Variable>>,
    pub line: u32,
}

impl BlockCommand {
    pub fn iter(&self) -> Iter<'_, Command> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_declaration(&self) -> bool {
        !self.declares.is_empty()
    }
}

/// Assign Command
///
/// `target = value;`, or a bare expression statement when `target` is
/// `None`.
#[derive(Debug, Clone)]
pub struct AssignCommand {
    pub target: Option<SetExpr>,
    pub value: Expr,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct PrintCommand {
    pub value: Option<Expr>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct AssertCommand {
    pub condition: Expr,
    pub message: Option<Expr>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct IfCommand {
    pub condition: Expr,
    pub then_body: Box<Command>,
    pub else_body: Option<Box<Command>>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct WhileCommand {
    pub condition: Expr,
    pub body: Box<Command>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct DoWhileCommand {
    pub body: Box<Command>,
    pub condition: Expr,
    pub line: u32,
}

/// For Command
///
/// `for (variable in iterable) body`, binding `variable` to each element.
#[derive(Debug, Clone)]
pub struct ForCommand {
    pub variable: Rc<Variable>,
    pub iterable: Expr,
    pub body: Box<Command>,
    pub line: u32,
}
