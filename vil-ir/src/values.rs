//! IR Value Representations
//!
//! Defines values that can be used as operands in IR instructions:
//! temporaries, literals, function references and the error placeholder.

use vil_common::TempId;
use serde::{Deserialize, Serialize};
use std::fmt;
use vil_ast::Type;
use crate::VilType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Result of an instruction or a block parameter
    Temp(TempId),

    /// The unit value
    Unit,

    /// Placeholder for something that failed to type check or lower
    Error,

    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),

    /// Reference to a module function, by name
    Function(String),

    /// Reference to a function provided by the runtime
    Builtin(String),
}

/// IR Value - an operand tagged with its IR type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub kind: ValueKind,
    pub ty: VilType,
}

impl Value {
    pub fn new(kind: ValueKind, ty: VilType) -> Self {
        Self { kind, ty }
    }

    pub fn temp(id: TempId, ty: VilType) -> Self {
        Self::new(ValueKind::Temp(id), ty)
    }

    pub fn unit() -> Self {
        Self::new(ValueKind::Unit, VilType::unit())
    }

    pub fn error(ty: VilType) -> Self {
        Self::new(ValueKind::Error, ty)
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ValueKind::Bool(value), VilType::object(Type::bool()))
    }

    pub fn int(value: i64) -> Self {
        Self::new(ValueKind::Int(value), VilType::object(Type::int()))
    }

    pub fn float(value: f64) -> Self {
        Self::new(ValueKind::Float(value), VilType::object(Type::double()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ValueKind::String(value.into()), VilType::object(Type::string()))
    }

    pub fn function(name: impl Into<String>, ty: Type) -> Self {
        Self::new(ValueKind::Function(name.into()), VilType::object(ty))
    }

    pub fn builtin(name: impl Into<String>, ty: Type) -> Self {
        Self::new(ValueKind::Builtin(name.into()), VilType::object(ty))
    }

    pub fn is_address(&self) -> bool {
        self.ty.is_address
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ValueKind::Error)
    }

    pub fn as_temp(&self) -> Option<TempId> {
        match self.kind {
            ValueKind::Temp(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValueKind::Temp(id) => write!(f, "%{id}"),
            ValueKind::Unit => write!(f, "unit"),
            ValueKind::Error => write!(f, "<error>"),
            ValueKind::Bool(value) => write!(f, "{value}"),
            ValueKind::Int(value) => write!(f, "{value}"),
            ValueKind::Float(value) => write!(f, "{value:?}"),
            ValueKind::String(value) => write!(f, "{value:?}"),
            ValueKind::Function(name) => write!(f, "@{name}"),
            ValueKind::Builtin(name) => write!(f, "@builtin.{name}"),
        }
    }
}
