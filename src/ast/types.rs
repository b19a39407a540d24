use std::fmt::Display;

/// Literal value carried by a constant expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(i32),
    Text(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Number(value) => write!(f, "{}", value),
            Literal::Text(value) => {
                write!(f, "\"")?;
                for ch in value.chars() {
                    match ch {
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\r' => write!(f, "\\r")?,
                        '\0' => write!(f, "\\0")?,
                        '\\' => write!(f, "\\\\")?,
                        '"' => write!(f, "\\\"")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                write!(f, "\"")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    IfNull,
    And,
    Or,
    LowerThan,
    GreaterThan,
    LowerEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::IfNull => "??",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::LowerThan => "<",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LowerEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
    PreInc,
    PreDec,
    PosInc,
    PosDec,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::PreInc | UnaryOp::PosInc => "++",
            UnaryOp::PreDec | UnaryOp::PosDec => "--",
        }
    }

    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOp::PosInc | UnaryOp::PosDec)
    }
}

/// Built-in single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionOp {
    Read,
    Random,
    Length,
    Keys,
    Values,
    ToBool,
    ToInt,
    ToStr,
}

impl FunctionOp {
    pub fn name(&self) -> &'static str {
        match self {
            FunctionOp::Read => "read",
            FunctionOp::Random => "random",
            FunctionOp::Length => "length",
            FunctionOp::Keys => "keys",
            FunctionOp::Values => "values",
            FunctionOp::ToBool => "tobool",
            FunctionOp::ToInt => "toint",
            FunctionOp::ToStr => "tostr",
        }
    }
}

/// Whether a variable may hold `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Declared without `?`, never null.
    Safe,
    /// Declared with `?`.
    Unsafe,
}

/// A declared variable.
///
/// Owned by the symbol table and shared through `Rc` by every expression
/// that reads or writes it. `slot` is the variable's dense index among all
/// variables of the parse, so an evaluator can store values in a flat
/// vector of `symbol_count` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub line: u32,
    pub constant: bool,
    pub kind: VariableKind,
    pub slot: usize,
}

impl Variable {
    pub fn is_nullable(&self) -> bool {
        self.kind == VariableKind::Unsafe
    }
}
