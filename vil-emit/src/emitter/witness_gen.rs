//! Witness thunks
//!
//! A witness thunk has the signature of a view requirement and forwards to
//! the function implementing it for a concrete type. Unless the requirement
//! is a constructor, its receiver is an existential container that the thunk
//! opens to get at the concrete receiver.

use log::debug;
use vil_ast::DeclId;
use vil_ir::{Builder, Signature};
use crate::expressions::emit_assign_value;
use crate::{Emitter, OrFatal};

impl Emitter<'_> {
    /// Emits the thunk through which `implementation` satisfies
    /// `requirement` and returns its name.
    ///
    /// The body is one apply followed by a return, except for constructor
    /// requirements: their concrete result is packed into a container of the
    /// view's type between the apply and the return.
    pub fn emit_witness(&mut self, builder: &mut Builder, implementation: DeclId, requirement: DeclId) -> String {
        let ast = self.ast;
        let Some(req) = ast.fun(requirement) else {
            fatal!("requirement '{}' is not a function", ast.decl(requirement).name);
        };
        let Some(imp) = ast.fun(implementation) else {
            fatal!(
                "requirement '{}' is satisfied by {} '{}'",
                ast.decl(requirement).name,
                ast.decl(implementation).kind_name(),
                ast.decl(implementation).name
            );
        };

        let name = self.mangler.witness_name(ast, implementation, requirement);
        let signature = Signature::lower(&ast.unapplied_type(requirement));
        builder.get_or_create_function(&name, signature.clone()).or_fatal();
        debug!("lowering witness thunk '{name}' : {signature}");

        let mut builder = builder.scoped();
        let (entry, mut args) = builder.create_basic_block(&name, signature.params.clone()).or_fatal();
        builder.position_at_end(&name, entry);

        if !req.is_ctor() {
            let container = args
                .first()
                .cloned()
                .unwrap_or_else(|| fatal!("requirement '{name}' has no receiver"));
            let opened_type = imp
                .self_decl
                .map(|self_decl| ast.decl(self_decl).ty.base().clone())
                .unwrap_or_else(|| fatal!("implementation of '{name}' has no receiver"));

            args[0] = if req.is_mutating {
                let opened = builder.build_open_existential_addr(container, opened_type).or_fatal();
                if imp.is_mutating {
                    opened
                } else {
                    builder.build_load(opened).or_fatal()
                }
            } else {
                if imp.is_mutating {
                    fatal!("non-mutating requirement '{name}' is implemented by a mutating method");
                }
                builder.build_open_existential(container, opened_type).or_fatal()
            };
        }

        let function = self.declare_function(&mut builder, implementation);
        let result_type = self.lowered_signature(implementation).ret;
        let mut result = builder.build_apply(function, args, result_type.clone()).or_fatal();

        // Constructors of a view return the instance packed in a container.
        if result_type.val != signature.ret.val && signature.ret.is_existential() {
            let slot = builder.build_alloc_stack(signature.ret.val.clone()).or_fatal();
            emit_assign_value(&mut builder, result, &result_type.val, slot.clone());
            result = builder.build_load(slot).or_fatal();
        }

        builder.build_ret(result).or_fatal();
        name
    }
}
