//! Function Definitions
//!
//! A function is created on first reference, possibly before its body is
//! lowered, and filled in at most once. A function without blocks is a
//! declaration.

use vil_common::{IdGenerator, LabelId, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;
use vil_ast::{FunType, Type};
use crate::{BasicBlock, VilType};

/// Parameter and return types of a function, as IR types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<VilType>,
    pub ret: VilType,
}

impl Signature {
    pub fn new(params: Vec<VilType>, ret: VilType) -> Self {
        Self { params, ret }
    }

    pub fn lower(ty: &FunType) -> Self {
        Self {
            params: ty.params.iter().map(VilType::lower).collect(),
            ret: VilType::lower(&ty.ret),
        }
    }

    /// The source-level function type of references to the function
    pub fn fun_type(&self) -> Type {
        Type::function(
            self.params.iter().map(VilType::to_source).collect(),
            self.ret.to_source(),
        )
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// Function in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub signature: Signature,
    pub blocks: Vec<BasicBlock>,
    temps: IdGenerator,
    labels: IdGenerator,
}

impl Function {
    pub fn new(name: String, signature: Signature) -> Self {
        Self {
            name,
            signature,
            blocks: Vec::new(),
            temps: IdGenerator::new(),
            labels: IdGenerator::new(),
        }
    }

    pub fn new_temp(&mut self) -> TempId {
        self.temps.next_id()
    }

    pub fn new_label(&mut self) -> LabelId {
        self.labels.next_id()
    }

    pub fn add_block(&mut self, block: BasicBlock) {
        self.blocks.push(block);
    }

    pub fn get_block(&self, id: LabelId) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_block_mut(&mut self, id: LabelId) -> Option<&mut BasicBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn entry_block(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    /// Whether the function has no body in this module
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn instructions(&self) -> impl Iterator<Item = &crate::Instruction> {
        self.blocks.iter().flat_map(|b| b.instructions.iter())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fun @{} : {}", self.name, self.signature)?;
        if self.is_declaration() {
            return writeln!(f);
        }
        writeln!(f, " {{")?;
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        writeln!(f, "}}")
    }
}
