//! Typed expressions

use serde::{Deserialize, Serialize};
use vil_common::SourceSpan;
use crate::{DeclId, Type};

/// A type-checked expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    BoolLiteral(bool),
    IntLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),

    /// Reference to a declaration resolved by name lookup
    DeclRef(DeclId),

    /// Reference to a member of `base` (stored property or method)
    MemberRef {
        base: Box<Expr>,
        member: DeclId,
    },

    /// Function application
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },

    /// `target = value`
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    /// `&operand`, passing a location to an `inout` parameter
    AddrOf(Box<Expr>),

    /// Placeholder for an expression that failed to type check
    Error,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: Type) -> Self {
        Self { kind, ty, span: SourceSpan::dummy() }
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ExprKind::BoolLiteral(value), Type::bool())
    }

    pub fn int(value: i64) -> Self {
        Self::new(ExprKind::IntLiteral(value), Type::int())
    }

    pub fn float(value: f64) -> Self {
        Self::new(ExprKind::FloatLiteral(value), Type::double())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::StringLiteral(value.into()), Type::string())
    }

    pub fn decl_ref(decl: DeclId, ty: Type) -> Self {
        Self::new(ExprKind::DeclRef(decl), ty)
    }

    pub fn member(base: Expr, member: DeclId, ty: Type) -> Self {
        Self::new(ExprKind::MemberRef { base: Box::new(base), member }, ty)
    }

    pub fn call(callee: Expr, args: Vec<Expr>, ty: Type) -> Self {
        Self::new(ExprKind::Call { callee: Box::new(callee), args }, ty)
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::new(
            ExprKind::Assign { target: Box::new(target), value: Box::new(value) },
            Type::Unit,
        )
    }

    pub fn addr_of(operand: Expr) -> Self {
        let ty = Type::inout(operand.ty.clone());
        Self::new(ExprKind::AddrOf(Box::new(operand)), ty)
    }

    pub fn error() -> Self {
        Self::new(ExprKind::Error, Type::Error)
    }

    /// Visits this expression and every sub-expression, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expr)) {
        visit(self);
        match &self.kind {
            ExprKind::MemberRef { base, .. } => base.walk(visit),
            ExprKind::Call { callee, args } => {
                callee.walk(visit);
                for arg in args {
                    arg.walk(visit);
                }
            }
            ExprKind::Assign { target, value } => {
                target.walk(visit);
                value.walk(visit);
            }
            ExprKind::AddrOf(operand) => operand.walk(visit),
            ExprKind::BoolLiteral(_)
            | ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::DeclRef(_)
            | ExprKind::Error => {}
        }
    }
}
