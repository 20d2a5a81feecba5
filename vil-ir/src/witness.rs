//! Witness Tables
//!
//! One table per (concrete type, view) conformance. Each entry maps a view
//! requirement to the thunk that forwards to the type's implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use vil_ast::{DeclId, NominalType, Type};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessEntry {
    pub requirement: DeclId,
    pub requirement_name: String,
    /// Name of the witness thunk in the module
    pub function: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessTable {
    pub ty: Type,
    pub view: NominalType,
    pub entries: Vec<WitnessEntry>,
}

impl WitnessTable {
    pub fn new(ty: Type, view: NominalType) -> Self {
        Self { ty, view, entries: Vec::new() }
    }

    pub fn add_entry(&mut self, requirement: DeclId, requirement_name: impl Into<String>, function: impl Into<String>) {
        self.entries.push(WitnessEntry {
            requirement,
            requirement_name: requirement_name.into(),
            function: function.into(),
        });
    }

    pub fn entry(&self, requirement: DeclId) -> Option<&WitnessEntry> {
        self.entries.iter().find(|e| e.requirement == requirement)
    }
}

impl fmt::Display for WitnessTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "witness_table {}: {} {{", self.ty, self.view)?;
        for entry in &self.entries {
            writeln!(f, "  {}.{}: @{}", self.view, entry.requirement_name, entry.function)?;
        }
        writeln!(f, "}}")
    }
}
