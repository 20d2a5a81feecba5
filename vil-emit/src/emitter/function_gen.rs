//! Function lowering: declaration, prologue, body and epilogue

use log::debug;
use vil_ast::{BraceStmt, DeclId, Type};
use vil_ir::{Builder, Signature, Value, VilType};
use crate::statements::emit_brace;
use crate::{Emitter, FunctionEmitter, LoweringDiagnostic, OrFatal, SymbolTable};
use super::emit_synthesized_body;

impl Emitter<'_> {
    /// Signature of the VIL function lowering `decl`
    ///
    /// The receiver of members comes first, then one parameter per capture,
    /// then the formal parameters. Types are contextualized in the function's
    /// generic environment.
    pub(crate) fn lowered_signature(&self, decl: DeclId) -> Signature {
        let ast = self.ast;
        let fun = ast
            .fun(decl)
            .unwrap_or_else(|| fatal!("'{}' is not a function", ast.decl(decl).name));
        let env = &fun.generic_env;
        let unapplied = ast.unapplied_type(decl);

        let mut formals = unapplied.params.iter();
        let mut params = Vec::with_capacity(unapplied.params.len());
        if fun.is_member {
            let receiver = formals
                .next()
                .unwrap_or_else(|| fatal!("member '{}' has no receiver", ast.decl(decl).name));
            params.push(VilType::lower(&receiver.contextualized(env)));
        }
        for capture in ast.captures(decl) {
            params.push(VilType::object(ast.decl(capture).ty.base().contextualized(env)));
        }
        params.extend(formals.map(|ty| VilType::lower(&ty.contextualized(env))));

        Signature::new(params, VilType::lower(&unapplied.ret.contextualized(env)))
    }

    /// Declares the VIL function lowering `decl` and returns a reference to it.
    pub(crate) fn declare_function(&mut self, builder: &mut Builder, decl: DeclId) -> Value {
        let name = self.mangler.function_name(self.ast, decl);
        let signature = self.lowered_signature(decl);
        builder.get_or_create_function(&name, signature).or_fatal()
    }

    /// Lowers a function or constructor declaration.
    ///
    /// Declarations without a body (and not synthesized) only declare the
    /// function. The builder's insertion point is left unchanged.
    pub fn emit_function(&mut self, builder: &mut Builder, decl: DeclId) {
        let ast = self.ast;
        let Some(fun) = ast.fun(decl) else {
            fatal!("'{}' is not a function", ast.decl(decl).name);
        };
        if fun.is_builtin() {
            return;
        }

        self.declare_function(builder, decl);
        let name = self.mangler.function_name(ast, decl);
        if fun.body.is_none() && !fun.is_synthesized {
            return;
        }

        let signature = match builder.module().get_function(&name) {
            Some(function) if function.is_declaration() => function.signature.clone(),
            Some(_) => fatal!("function '{name}' is lowered twice"),
            None => fatal!("function '{name}' was not declared"),
        };
        debug!("lowering function '{name}' : {signature}");

        let mut builder = builder.scoped();
        let (entry, args) = builder.create_basic_block(&name, signature.params).or_fatal();
        builder.position_at_end(&name, entry);

        let mut locals = SymbolTable::new();
        let mut args = args.into_iter();

        if let Some(self_decl) = fun.self_decl {
            if fun.is_member {
                let receiver = args
                    .next()
                    .unwrap_or_else(|| fatal!("member '{name}' has no receiver argument"));
                locals.insert(self_decl, receiver);
            } else if fun.is_ctor() {
                let self_type = ast.decl(self_decl).ty.base().contextualized(&fun.generic_env);
                let slot = builder.build_alloc_stack(self_type).or_fatal();
                locals.insert(self_decl, slot);
            } else {
                fatal!("'{name}' has a receiver but is neither a member nor a constructor");
            }
        }

        for bound in ast.captures(decl).into_iter().chain(fun.params.iter().copied()) {
            let arg = args
                .next()
                .unwrap_or_else(|| fatal!("missing argument for '{}' in '{name}'", ast.decl(bound).name));
            locals.insert(bound, arg);
        }

        let mut gen = FunctionEmitter::new(self, &mut *builder, decl, locals);
        match &fun.body {
            Some(body) => {
                emit_brace(&mut gen, body);
                gen.emit_epilogue(body);
            }
            None => emit_synthesized_body(&mut gen),
        }
    }
}

impl FunctionEmitter<'_, '_> {
    fn emit_epilogue(&mut self, body: &BraceStmt) {
        let fun = self.fun();

        if fun.is_ctor() {
            let self_decl = fun
                .self_decl
                .unwrap_or_else(|| fatal!("constructor without receiver"));
            let location = self
                .locals
                .get(self_decl)
                .cloned()
                .unwrap_or_else(|| fatal!("constructor receiver is not bound"));
            let value = self.builder.build_load(location).or_fatal();
            self.builder.build_ret(value).or_fatal();
            return;
        }

        if self.builder.current_block_is_terminated() {
            return;
        }

        match self.return_type() {
            Type::Nothing => self.builder.build_halt().or_fatal(),
            Type::Unit => self.builder.build_ret(Value::unit()).or_fatal(),
            _ => self.emitter.report(LoweringDiagnostic::MissingReturnValueInNonUnitFunction {
                span: body.span.end_point(),
            }),
        }
    }
}
