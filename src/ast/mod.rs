/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Command` and `Expr` enums, their type tags and `SetExpr`
/// - expressions: Node types for the expression variants
/// - statements: Node types for the command variants
/// - types: Literals, operators and the shared `Variable` record
/// - printer: Canonical source rendering of a tree
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
