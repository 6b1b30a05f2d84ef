//! The binding store consulted during evaluation. Variables and procedures
//! live in two independent maps, so in principle one name could be bound in
//! both; `define` refuses names that already exist in either map, which
//! keeps user programs unambiguous. There is a single global environment,
//! no parent chain and no lexical scopes.

use std::collections::HashMap;

use crate::SemanticError;
use crate::ast::{Expression, Procedure};

/// Variable and procedure bindings, keyed by name.
///
/// A fresh environment is completely empty. `Interpreter::new` seeds one via
/// [`crate::builtins::install`]; [`Environment::reset`] strips everything
/// again, builtins included, and nothing re-seeds implicitly.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<String, Expression>,
    procedures: HashMap<String, Procedure>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variables: HashMap::new(),
            procedures: HashMap::new(),
        }
    }

    /// Bind a variable, overwriting any previous binding of the name.
    pub fn add(&mut self, name: &str, value: Expression) {
        self.variables.insert(name.to_owned(), value);
    }

    /// Bind a procedure, overwriting any previous binding of the name.
    pub fn add_procedure(&mut self, name: &str, procedure: Procedure) {
        self.procedures.insert(name.to_owned(), procedure);
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Result<&Expression, SemanticError> {
        self.variables.get(name).ok_or_else(|| {
            SemanticError::new(format!("Symbol '{name}' not found in environment"))
        })
    }

    /// Look up a procedure.
    pub fn get_procedure(&self, name: &str) -> Result<Procedure, SemanticError> {
        self.procedures.get(name).copied().ok_or_else(|| {
            SemanticError::new(format!("Procedure '{name}' not found in environment"))
        })
    }

    pub fn is_symbol_defined(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn is_procedure_defined(&self, name: &str) -> bool {
        self.procedures.contains_key(name)
    }

    /// Clear both maps completely. This removes the bootstrap procedures and
    /// `pi` along with user bindings; call [`crate::builtins::install`]
    /// afterwards for a fresh default world.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.procedures.clear();
    }

    /// Sorted variable names, for hosts that display bindings.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted procedure names, for hosts that display bindings.
    pub fn procedure_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.procedures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
