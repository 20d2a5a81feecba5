//! Statements and patterns

use serde::{Deserialize, Serialize};
use vil_common::SourceSpan;
use crate::{DeclId, Expr};

/// A statement inside a function body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Local declaration (binding, nested function or nested type)
    Decl(DeclId),
    Brace(BraceStmt),
    Return(ReturnStmt),
    Expr(Expr),
}

impl Stmt {
    /// Span of the statement; declarations are looked up in the AST
    pub fn span<'a>(&'a self, ast: &'a crate::Ast) -> &'a SourceSpan {
        match self {
            Stmt::Decl(decl) => &ast.decl(*decl).span,
            Stmt::Brace(brace) => &brace.span,
            Stmt::Return(ret) => &ret.span,
            Stmt::Expr(expr) => &expr.span,
        }
    }
}

/// `{ stmts... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BraceStmt {
    pub stmts: Vec<Stmt>,
    pub span: SourceSpan,
}

impl BraceStmt {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts, span: SourceSpan::dummy() }
    }

    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = span;
        self
    }
}

/// `return [value]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: SourceSpan,
}

impl ReturnStmt {
    pub fn new(value: Option<Expr>) -> Self {
        Self { value, span: SourceSpan::dummy() }
    }
}

/// Left-hand side of a pattern binding declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// Introduces the variable declaration it refers to
    Named(DeclId),
    Tuple(Vec<Pattern>),
    Wildcard,
}

impl Pattern {
    /// The variables introduced by the pattern, in source order
    pub fn named_decls(&self) -> Vec<DeclId> {
        let mut decls = Vec::new();
        self.collect_named(&mut decls);
        decls
    }

    fn collect_named(&self, out: &mut Vec<DeclId>) {
        match self {
            Pattern::Named(decl) => out.push(*decl),
            Pattern::Tuple(elements) => {
                for element in elements {
                    element.collect_named(out);
                }
            }
            Pattern::Wildcard => {}
        }
    }

    /// The variable bound to the whole initializer, if the pattern binds exactly that
    pub fn single_var_decl(&self) -> Option<DeclId> {
        match self {
            Pattern::Named(decl) => Some(*decl),
            Pattern::Tuple(elements) if elements.len() == 1 => elements[0].single_var_decl(),
            _ => None,
        }
    }
}
