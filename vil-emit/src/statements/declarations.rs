//! Local declarations: bindings, nested functions and nested types

use vil_ast::{DeclId, DeclKind, PatternBindingDecl, Type};
use vil_ir::{Value, VilType};
use crate::expressions::{emit_assign, emit_decl_value, emit_rvalue};
use crate::{FunctionEmitter, OrFatal};

pub fn emit_local_decl(gen: &mut FunctionEmitter, decl: DeclId) {
    let ast = gen.ast();
    let node = ast.decl(decl);
    match &node.kind {
        DeclKind::PatternBinding(binding) => emit_local_binding(gen, binding),
        DeclKind::Fun(fun) if fun.is_builtin() => {}
        DeclKind::Fun(_) => emit_local_function(gen, decl),
        DeclKind::ProductType(_)
        | DeclKind::ViewType(_)
        | DeclKind::AbstractType
        | DeclKind::AliasType(_)
        | DeclKind::TypeExtension(_) => gen.emitter.emit_top_level(gen.builder, decl),
        DeclKind::Module(_) | DeclKind::Import | DeclKind::Var(_) | DeclKind::FunParam(_) | DeclKind::GenericParam => {
            fatal!("unexpected {} '{}' in function body", node.kind_name(), node.name)
        }
    }
}

/// Allocates one stack location per name of the pattern, then initializes
/// it from the initializer, if any.
pub fn emit_local_binding(gen: &mut FunctionEmitter, binding: &PatternBindingDecl) {
    let locations: Vec<Value> = binding
        .pattern
        .named_decls()
        .into_iter()
        .map(|var| emit_local_var(gen, var))
        .collect();

    let Some(initializer) = &binding.initializer else {
        return;
    };
    match (binding.pattern.single_var_decl(), locations.first()) {
        (Some(_), Some(location)) => emit_assign(gen, initializer, location.clone()),
        (None, None) => {
            emit_rvalue(gen, initializer);
        }
        _ => fatal!("cannot lower destructuring pattern binding"),
    }
}

/// Allocates the stack location of a local variable and binds it.
///
/// A variable whose type did not check is bound to the error value instead.
pub fn emit_local_var(gen: &mut FunctionEmitter, var: DeclId) -> Value {
    let ast = gen.ast();
    let decl = ast.decl(var);
    if decl.ty.is_error() {
        let value = Value::error(VilType::address(Type::Error));
        gen.locals.insert(var, value.clone());
        return value;
    }

    match &decl.kind {
        DeclKind::Var(v) if v.has_storage => {}
        DeclKind::Var(_) => fatal!("cannot lower computed local variable '{}'", decl.name),
        _ => fatal!("'{}' is a {}, not a variable", decl.name, decl.kind_name()),
    }

    let ty = gen.contextualize(&decl.ty);
    let location = gen.builder.build_alloc_stack(ty).or_fatal();
    gen.locals.insert(var, location.clone());
    location
}

/// Lowers a nested function.
///
/// A function capturing declarations of its enclosing functions is bound to
/// a closure stored in a fresh stack location: the partial application of
/// the lowered function to the current values of its captures.
pub fn emit_local_function(gen: &mut FunctionEmitter, decl: DeclId) {
    gen.emitter.emit_function(gen.builder, decl);

    let ast = gen.ast();
    let captures = ast.captures(decl);
    if captures.is_empty() {
        return;
    }

    let span = &ast.decl(decl).span;
    let args: Vec<Value> = captures
        .iter()
        .map(|capture| emit_decl_value(gen, *capture, span))
        .collect();

    let function = gen.emitter.declare_function(gen.builder, decl);
    let closure_type = gen.contextualize(&ast.decl(decl).ty);
    let location = gen.builder.build_alloc_stack(closure_type.clone()).or_fatal();
    let closure = gen.builder.build_partial_apply(function, args, closure_type).or_fatal();
    gen.builder.build_store(closure, location.clone()).or_fatal();
    gen.locals.insert(decl, location);
}
