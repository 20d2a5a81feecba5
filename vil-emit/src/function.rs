//! Per-function lowering context

use vil_ast::{Ast, DeclId, FunDecl, GenericEnv, Type};
use vil_common::SourceSpan;
use vil_ir::Builder;
use crate::{Emitter, LoweringDiagnostic, LoweringError, SymbolTable};

/// State of the function whose body is being lowered
///
/// Statement and expression lowering append to `builder` at its current
/// insertion point and resolve declarations through `locals`.
pub struct FunctionEmitter<'e, 'ast> {
    pub emitter: &'e mut Emitter<'ast>,
    pub builder: &'e mut Builder,
    pub decl: DeclId,
    pub locals: SymbolTable,
}

impl<'e, 'ast> FunctionEmitter<'e, 'ast> {
    pub fn new(
        emitter: &'e mut Emitter<'ast>,
        builder: &'e mut Builder,
        decl: DeclId,
        locals: SymbolTable,
    ) -> Self {
        Self { emitter, builder, decl, locals }
    }

    pub fn ast(&self) -> &'ast Ast {
        self.emitter.ast
    }

    pub fn fun(&self) -> &'ast FunDecl {
        let ast = self.ast();
        ast.fun(self.decl)
            .unwrap_or_else(|| fatal!("'{}' is not a function", ast.decl(self.decl).name))
    }

    pub fn generic_env(&self) -> &'ast GenericEnv {
        &self.fun().generic_env
    }

    /// `ty` as seen from inside the function's generic environment
    pub fn contextualize(&self, ty: &Type) -> Type {
        ty.contextualized(self.generic_env())
    }

    pub fn return_type(&self) -> Type {
        let unapplied = self.ast().unapplied_type(self.decl);
        self.contextualize(&unapplied.ret)
    }

    /// Reports an expression that could not be lowered.
    pub fn report(&mut self, error: LoweringError, span: &SourceSpan) {
        self.emitter.report(LoweringDiagnostic::UnloweredExpression {
            error,
            span: span.clone(),
        });
    }
}
