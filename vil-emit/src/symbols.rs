//! Local symbol table
//!
//! Maps declarations to the value standing for them in the function being
//! lowered: a stack location for local variables, an argument for parameters
//! and captures. One table per function activation; nested functions get
//! their own.

use std::collections::HashMap;
use vil_ast::DeclId;
use vil_ir::Value;

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    values: HashMap<DeclId, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, decl: DeclId, value: Value) {
        self.values.insert(decl, value);
    }

    pub fn get(&self, decl: DeclId) -> Option<&Value> {
        self.values.get(&decl)
    }

    pub fn contains(&self, decl: DeclId) -> bool {
        self.values.contains_key(&decl)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
