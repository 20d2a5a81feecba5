//! Typed AST consumed by the lowering pass
//!
//! Every node carries a resolved [`Type`] or the explicit [`Type::Error`]
//! marker. Declarations live in an [`Ast`] arena and are identified by
//! [`DeclId`]; statements and expressions refer to them by id.

pub mod captures;
pub mod construct;
pub mod context;
pub mod decl;
pub mod expr;
pub mod stmt;
pub mod types;

pub use construct::Param;
pub use context::Ast;
pub use decl::{
    AliasTypeDecl, Conformance, ConformanceEntry, Decl, DeclId, DeclKind, FunDecl, FunKind,
    FunParamDecl, ModuleDecl, PatternBindingDecl, ProductTypeDecl, TypeExtnDecl, VarDecl,
    ViewTypeDecl,
};
pub use expr::{Expr, ExprKind};
pub use stmt::{BraceStmt, Pattern, ReturnStmt, Stmt};
pub use types::{BuiltinType, FunType, GenericEnv, NominalType, Type};
