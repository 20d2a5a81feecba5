//! Bodies of compiler-synthesized functions

use vil_ast::DeclKind;
use crate::{FunctionEmitter, OrFatal};

/// Lowers the body of a synthesized function.
///
/// Only memberwise constructors are synthesized: each stored member of the
/// constructed type is initialized from the parameter at the same position.
pub(crate) fn emit_synthesized_body(gen: &mut FunctionEmitter) {
    let ast = gen.ast();
    let decl = ast.decl(gen.decl);
    let fun = gen.fun();
    if !fun.is_synthesized || !fun.is_ctor() {
        fatal!("unexpected synthesized {} '{}'", decl.kind_name(), decl.name);
    }

    let type_decl = match decl.parent {
        Some(parent) if matches!(ast.decl(parent).kind, DeclKind::ProductType(_)) => parent,
        _ => fatal!("memberwise constructor '{}' outside of a product type", decl.name),
    };
    let receiver = fun
        .self_decl
        .and_then(|self_decl| gen.locals.get(self_decl).cloned())
        .unwrap_or_else(|| fatal!("constructor receiver is not bound"));

    for (var, param) in ast.stored_vars(type_decl).into_iter().zip(fun.params.iter()) {
        let member = ast.decl(var);
        let member_type = gen.contextualize(&member.ty);
        let address = gen
            .builder
            .build_record_member_addr(receiver.clone(), var, &member.name, member_type)
            .or_fatal();
        let value = gen
            .locals
            .get(*param)
            .cloned()
            .unwrap_or_else(|| fatal!("parameter '{}' is not bound", ast.decl(*param).name));
        gen.builder.build_store(value, address).or_fatal();
    }

    let value = gen.builder.build_load(receiver).or_fatal();
    gen.builder.build_ret(value).or_fatal();
}
