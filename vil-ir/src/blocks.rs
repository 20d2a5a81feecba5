//! Basic Block Management
//!
//! A basic block is a sequence of instructions ending in one terminator.
//! Blocks declare their parameters; the entry block's parameters are the
//! function's arguments.

use vil_common::{LabelId, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::{Instruction, Value, VilType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: LabelId,
    pub params: Vec<(TempId, VilType)>,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(id: LabelId, params: Vec<(TempId, VilType)>) -> Self {
        Self {
            id,
            params,
            instructions: Vec::new(),
        }
    }

    pub fn add_instruction(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn has_terminator(&self) -> bool {
        self.instructions.last().is_some_and(Instruction::is_terminator)
    }

    pub fn terminator_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_terminator()).count()
    }

    /// The block parameters as operands
    pub fn param_values(&self) -> Vec<Value> {
        self.params
            .iter()
            .map(|(id, ty)| Value::temp(*id, ty.clone()))
            .collect()
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bb{}", self.id)?;
        if !self.params.is_empty() {
            write!(f, "(")?;
            for (i, (id, ty)) in self.params.iter().enumerate() {
                if i > 0 { write!(f, ", ")?; }
                write!(f, "%{id} : {ty}")?;
            }
            write!(f, ")")?;
        }
        writeln!(f, ":")?;
        for instr in &self.instructions {
            writeln!(f, "  {instr}")?;
        }
        Ok(())
    }
}
