//! Semantic types attached to every typed AST node
//!
//! Types are fully resolved by the type checker; the only unresolved marker
//! is [`Type::Error`], which the lowering pass turns into an error value.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::DeclId;

/// Reference to a nominal declaration (product type, view, generic parameter)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NominalType {
    pub decl: DeclId,
    pub name: String,
}

impl NominalType {
    pub fn new(decl: DeclId, name: impl Into<String>) -> Self {
        Self { decl, name: name.into() }
    }
}

/// Types known to the compiler without a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinType {
    Int,
    Double,
    Bool,
    String,
}

/// Signature of a function value: parameter types and return type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunType {
    pub params: Vec<Type>,
    pub ret: Box<Type>,
}

impl FunType {
    pub fn new(params: Vec<Type>, ret: Type) -> Self {
        Self { params, ret: Box::new(ret) }
    }
}

/// A fully resolved source-level type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// The type of expressions that produce no value
    Unit,
    /// The type of expressions that never return
    Nothing,
    /// Marker for nodes that failed to type check
    Error,
    Builtin(BuiltinType),
    /// A nominal product type (struct-like, value semantics)
    Product(NominalType),
    /// Existential container over a composition of views
    Existential(Vec<NominalType>),
    /// Generic parameter, opened to a skolem inside its own environment
    GenericParam(NominalType),
    Union(Vec<Type>),
    Function(FunType),
    /// Mutable borrow of a location, as taken by `inout` parameters
    Inout(Box<Type>),
}

impl Type {
    pub fn int() -> Self {
        Type::Builtin(BuiltinType::Int)
    }

    pub fn double() -> Self {
        Type::Builtin(BuiltinType::Double)
    }

    pub fn bool() -> Self {
        Type::Builtin(BuiltinType::Bool)
    }

    pub fn string() -> Self {
        Type::Builtin(BuiltinType::String)
    }

    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function(FunType::new(params, ret))
    }

    pub fn inout(base: Type) -> Self {
        Type::Inout(Box::new(base))
    }

    /// Whether values of this type are stored in an existential container
    /// rather than with a statically known layout.
    pub fn is_existential(&self) -> bool {
        matches!(self, Type::Existential(_) | Type::GenericParam(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    pub fn is_error(&self) -> bool {
        match self {
            Type::Error => true,
            Type::Inout(base) => base.is_error(),
            _ => false,
        }
    }

    /// The type without its `inout` qualifier
    pub fn base(&self) -> &Type {
        match self {
            Type::Inout(base) => base,
            other => other,
        }
    }

    pub fn as_function(&self) -> Option<&FunType> {
        match self {
            Type::Function(fun) => Some(fun),
            _ => None,
        }
    }

    /// Substitutes the generic parameters bound in `env`.
    pub fn contextualized(&self, env: &GenericEnv) -> Type {
        match self {
            Type::GenericParam(param) => env
                .substitution(param.decl)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Type::Union(members) => {
                Type::Union(members.iter().map(|t| t.contextualized(env)).collect())
            }
            Type::Function(fun) => Type::Function(FunType {
                params: fun.params.iter().map(|t| t.contextualized(env)).collect(),
                ret: Box::new(fun.ret.contextualized(env)),
            }),
            Type::Inout(base) => Type::Inout(Box::new(base.contextualized(env))),
            Type::Unit
            | Type::Nothing
            | Type::Error
            | Type::Builtin(_)
            | Type::Product(_)
            | Type::Existential(_) => self.clone(),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 { write!(f, "{sep}")?; }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for NominalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for FunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_list(f, &self.params, ", ")?;
        write!(f, ") -> {}", self.ret)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Unit => write!(f, "Unit"),
            Type::Nothing => write!(f, "Nothing"),
            Type::Error => write!(f, "<error>"),
            Type::Builtin(BuiltinType::Int) => write!(f, "Int"),
            Type::Builtin(BuiltinType::Double) => write!(f, "Double"),
            Type::Builtin(BuiltinType::Bool) => write!(f, "Bool"),
            Type::Builtin(BuiltinType::String) => write!(f, "String"),
            Type::Product(nominal) | Type::GenericParam(nominal) => write!(f, "{nominal}"),
            Type::Existential(views) if views.is_empty() => write!(f, "Any"),
            Type::Existential(views) => write_list(f, views, " & "),
            Type::Union(members) => write_list(f, members, " | "),
            Type::Function(fun) => write!(f, "{fun}"),
            Type::Inout(base) => write!(f, "inout {base}"),
        }
    }
}

/// Generic environment of a declaration
///
/// Lists the generic parameters a declaration introduces, along with the
/// substitutions known for them at the point of use. Parameters without a
/// substitution stay opaque and are lowered with an existential layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericEnv {
    pub params: Vec<DeclId>,
    pub substitutions: Vec<(DeclId, Type)>,
}

impl GenericEnv {
    pub fn new(params: Vec<DeclId>) -> Self {
        Self { params, substitutions: Vec::new() }
    }

    pub fn with_substitution(mut self, param: DeclId, ty: Type) -> Self {
        self.substitutions.push((param, ty));
        self
    }

    pub fn substitution(&self, param: DeclId) -> Option<&Type> {
        self.substitutions
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, ty)| ty)
    }
}
