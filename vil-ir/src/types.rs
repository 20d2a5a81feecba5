//! IR Type System
//!
//! A VIL type is a source-level type together with its category: values
//! held in registers are objects, values denoting memory are addresses.

use serde::{Deserialize, Serialize};
use std::fmt;
use vil_ast::Type;

/// IR type of a value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VilType {
    /// The type of the value held (or pointed to, for addresses)
    pub val: Type,
    pub is_address: bool,
}

impl VilType {
    pub fn object(val: Type) -> Self {
        Self { val, is_address: false }
    }

    pub fn address(val: Type) -> Self {
        Self { val, is_address: true }
    }

    /// Lowers a source type; `inout T` is passed as the address of a `T`.
    pub fn lower(ty: &Type) -> Self {
        match ty {
            Type::Inout(base) => Self::address((**base).clone()),
            other => Self::object(other.clone()),
        }
    }

    pub fn unit() -> Self {
        Self::object(Type::Unit)
    }

    pub fn error() -> Self {
        Self::object(Type::Error)
    }

    /// The address type of a location holding values of this type
    pub fn as_address(&self) -> Self {
        Self::address(self.val.clone())
    }

    /// The object type of the values stored at this location
    pub fn as_object(&self) -> Self {
        Self::object(self.val.clone())
    }

    pub fn is_existential(&self) -> bool {
        self.val.is_existential()
    }

    pub fn is_error(&self) -> bool {
        self.val.is_error()
    }

    /// Back to a source type, addresses becoming `inout`
    pub fn to_source(&self) -> Type {
        if self.is_address {
            Type::inout(self.val.clone())
        } else {
            self.val.clone()
        }
    }
}

impl fmt::Display for VilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_address {
            write!(f, "*")?;
        }
        write!(f, "{}", self.val)
    }
}
