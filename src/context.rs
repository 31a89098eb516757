//! Per-compilation state
//!
//! A [`CompileContext`] owns everything a single compilation may look up or
//! record: a reference to the immutable constant table and the variables
//! defined by `let` blocks so far. A fresh context is created for every
//! compilation, so independent compilations never see each other's variables.

use crate::constants::ConstantTable;
use crate::error::{CompileError, Result};
use std::collections::HashMap;

#[derive(Debug)]
pub struct CompileContext<'t> {
    constants: &'t ConstantTable,
    variables: HashMap<String, String>,
}

impl CompileContext<'static> {
    /// A context over the built-in constant table with no variables.
    pub fn new() -> Self {
        Self::with_constants(ConstantTable::builtin())
    }
}

impl Default for CompileContext<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> CompileContext<'t> {
    pub fn with_constants(constants: &'t ConstantTable) -> Self {
        Self {
            constants,
            variables: HashMap::new(),
        }
    }

    /// Resolve a `<name>` token, failing if the table has no such constant.
    pub fn constant(&self, token: &str) -> Result<&'t str> {
        self.constants
            .get(token)
            .ok_or_else(|| CompileError::UnknownConstant {
                name: token.to_string(),
            })
    }

    /// The fragment bound to a `.name` reference, if it has been defined yet.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Bind `name` (including its leading `.`) to an already resolved fragment.
    ///
    /// Each name can be bound once per compilation.
    pub fn define(&mut self, name: &str, fragment: String) -> Result<()> {
        if self.variables.contains_key(name) {
            return Err(CompileError::DuplicateVariable {
                name: name.to_string(),
            });
        }
        log::trace!("defined {name} = {fragment:?}");
        self.variables.insert(name.to_string(), fragment);
        Ok(())
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}
