//! Declarations
//!
//! Declarations live in the [`Ast`](crate::Ast) arena and are referred to by
//! [`DeclId`]. The identity of a declaration is its id, never its name: two
//! declarations may share a name and still be distinct.

use serde::{Deserialize, Serialize};
use std::fmt;
use vil_common::SourceSpan;
use crate::{BraceStmt, Expr, GenericEnv, Pattern, Type};

/// Stable arena index of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub u32);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A declaration together with its resolved type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    pub name: String,
    pub kind: DeclKind,
    /// Type of the declared entity; for functions, the applied signature
    pub ty: Type,
    /// Enclosing declaration space (module, type, extension or function)
    pub parent: Option<DeclId>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclKind {
    Module(ModuleDecl),
    Import,
    PatternBinding(PatternBindingDecl),
    Var(VarDecl),
    Fun(FunDecl),
    FunParam(FunParamDecl),
    ProductType(ProductTypeDecl),
    ViewType(ViewTypeDecl),
    AbstractType,
    AliasType(AliasTypeDecl),
    TypeExtension(TypeExtnDecl),
    GenericParam,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDecl {
    pub members: Vec<DeclId>,
}

/// `var x = ...` / `let (a, b) = ...`, local or as a stored member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternBindingDecl {
    pub is_member: bool,
    pub is_mutable: bool,
    pub pattern: Pattern,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    /// False for computed properties
    pub has_storage: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunKind {
    Regular,
    Ctor,
    /// Provided by the runtime, never lowered to a VIL function
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunDecl {
    pub kind: FunKind,
    pub params: Vec<DeclId>,
    pub body: Option<BraceStmt>,
    /// Implicit receiver declaration, for members and constructors
    pub self_decl: Option<DeclId>,
    /// Instance member taking its receiver as first argument
    pub is_member: bool,
    pub is_mutating: bool,
    /// Body is synthesized by the compiler (e.g. memberwise constructor)
    pub is_synthesized: bool,
    pub generic_env: GenericEnv,
}

impl FunDecl {
    pub fn is_ctor(&self) -> bool {
        self.kind == FunKind::Ctor
    }

    pub fn is_builtin(&self) -> bool {
        self.kind == FunKind::Builtin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunParamDecl {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductTypeDecl {
    pub members: Vec<DeclId>,
    pub conformances: Vec<Conformance>,
    pub generic_env: GenericEnv,
}

/// A protocol: a set of requirements, never lowered itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewTypeDecl {
    pub members: Vec<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasTypeDecl {
    pub aliased: Type,
    /// Conformances declared on the alias itself
    pub conformances: Vec<Conformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeExtnDecl {
    pub extended: DeclId,
    pub members: Vec<DeclId>,
}

/// A concrete type's claim to satisfy a view, as established by the type checker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conformance {
    pub view: DeclId,
    pub entries: Vec<ConformanceEntry>,
    pub span: SourceSpan,
}

/// Requirement of the view and the declaration satisfying it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceEntry {
    pub requirement: DeclId,
    pub implementation: DeclId,
}

impl Decl {
    pub fn as_fun(&self) -> Option<&FunDecl> {
        match &self.kind {
            DeclKind::Fun(fun) => Some(fun),
            _ => None,
        }
    }

    pub fn as_fun_mut(&mut self) -> Option<&mut FunDecl> {
        match &mut self.kind {
            DeclKind::Fun(fun) => Some(fun),
            _ => None,
        }
    }

    /// Members of a declaration space, in declaration order
    pub fn members(&self) -> &[DeclId] {
        match &self.kind {
            DeclKind::Module(module) => &module.members,
            DeclKind::ProductType(product) => &product.members,
            DeclKind::ViewType(view) => &view.members,
            DeclKind::TypeExtension(extension) => &extension.members,
            _ => &[],
        }
    }

    pub(crate) fn members_mut(&mut self) -> Option<&mut Vec<DeclId>> {
        match &mut self.kind {
            DeclKind::Module(module) => Some(&mut module.members),
            DeclKind::ProductType(product) => Some(&mut product.members),
            DeclKind::ViewType(view) => Some(&mut view.members),
            DeclKind::TypeExtension(extension) => Some(&mut extension.members),
            _ => None,
        }
    }

    /// Short description of the declaration kind, for messages
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            DeclKind::Module(_) => "module",
            DeclKind::Import => "import",
            DeclKind::PatternBinding(_) => "pattern binding",
            DeclKind::Var(_) => "variable",
            DeclKind::Fun(fun) => match fun.kind {
                FunKind::Ctor => "constructor",
                FunKind::Builtin => "builtin function",
                FunKind::Regular => "function",
            },
            DeclKind::FunParam(_) => "parameter",
            DeclKind::ProductType(_) => "product type",
            DeclKind::ViewType(_) => "view",
            DeclKind::AbstractType => "abstract type",
            DeclKind::AliasType(_) => "type alias",
            DeclKind::TypeExtension(_) => "type extension",
            DeclKind::GenericParam => "generic parameter",
        }
    }
}
