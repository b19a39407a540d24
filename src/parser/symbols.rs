//! Symbol table used for name resolution while parsing.
//!
//! Variables live in an arena (`variables`) and are indexed by their slot.
//! Names map to arena entries through a stack of scope frames. In
//! [`ScopeMode::Flat`] only the outermost frame exists, so every name is
//! global to the program and can be declared once.

use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    ast::types::{Variable, VariableKind},
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeMode {
    /// One namespace for the whole program; no shadowing.
    #[default]
    Flat,
    /// Braced bodies, for-each loops and list comprehensions open nested
    /// frames; inner declarations may shadow outer ones.
    Lexical,
}

#[derive(Debug)]
pub struct SymbolTable {
    mode: ScopeMode,
    frames: Vec<HashMap<String, Rc<Variable>>>,
    variables: Vec<Rc<Variable>>,
}

impl SymbolTable {
    pub fn new(mode: ScopeMode) -> Self {
        SymbolTable {
            mode,
            frames: vec![HashMap::new()],
            variables: vec![],
        }
    }

    pub fn mode(&self) -> ScopeMode {
        self.mode
    }

    /// Number of open frames, the global one included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_scope(&mut self) {
        if self.mode == ScopeMode::Lexical {
            self.frames.push(HashMap::new());
        }
    }

    pub fn pop_scope(&mut self) {
        if self.mode == ScopeMode::Lexical && self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Declares `name` in the innermost frame.
    ///
    /// Fails with `DuplicateDeclaration` if that frame already holds the name.
    pub fn declare(
        &mut self,
        name: &str,
        constant: bool,
        kind: VariableKind,
        position: Position,
    ) -> Result<Rc<Variable>, Error> {
        // The global frame is never popped
        let innermost = self.frames.len() - 1;
        let frame = &mut self.frames[innermost];

        if frame.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    variable: name.to_string(),
                },
                position,
            ));
        }

        let variable = Rc::new(Variable {
            name: name.to_string(),
            line: position.line(),
            constant,
            kind,
            slot: self.variables.len(),
        });

        frame.insert(name.to_string(), Rc::clone(&variable));
        self.variables.push(Rc::clone(&variable));

        trace!(name, slot = variable.slot, constant, ?kind, "declared variable");

        Ok(variable)
    }

    /// Registers the variable of a for-each loop or list comprehension.
    ///
    /// In lexical mode the caller has opened a frame for the loop and the
    /// variable is declared fresh in it. In flat mode an existing mutable
    /// variable of the same name is reused, so consecutive loops may share a
    /// loop variable; an existing constant is a duplicate declaration.
    pub fn declare_loop_variable(
        &mut self,
        name: &str,
        position: Position,
    ) -> Result<Rc<Variable>, Error> {
        if self.mode == ScopeMode::Flat {
            if let Some(existing) = self.lookup(name) {
                if existing.constant {
                    return Err(Error::new(
                        ErrorImpl::DuplicateDeclaration {
                            variable: name.to_string(),
                        },
                        position,
                    ));
                }
                return Ok(Rc::clone(existing));
            }
        }

        self.declare(name, false, VariableKind::Unsafe, position)
    }

    /// Resolves `name`, searching frames from the innermost outward.
    pub fn resolve(&self, name: &str, position: Position) -> Result<Rc<Variable>, Error> {
        match self.lookup(name) {
            Some(variable) => Ok(Rc::clone(variable)),
            None => Err(Error::new(
                ErrorImpl::UndeclaredName {
                    variable: name.to_string(),
                },
                position,
            )),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Rc<Variable>> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Every variable declared so far, indexed by slot.
    pub fn variables(&self) -> &[Rc<Variable>] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
