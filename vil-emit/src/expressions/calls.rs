//! Function application

use vil_ast::{DeclId, Expr, ExprKind, FunDecl, Type};
use vil_ir::{Value, VilType};
use crate::{FunctionEmitter, LoweringError, OrFatal};
use super::{emit_coerced, emit_lvalue, emit_rvalue};

/// Lowers `callee(args)`.
///
/// Method calls pass their receiver first: by address to mutating methods,
/// by value otherwise.
pub fn emit_call(gen: &mut FunctionEmitter, callee: &Expr, args: &[Expr], call: &Expr) -> Result<Value, LoweringError> {
    let ast = gen.ast();
    let result_type = VilType::object(gen.contextualize(&call.ty));

    if let ExprKind::MemberRef { base, member } = &callee.kind {
        if let Some(method) = ast.fun(*member) {
            return emit_method_call(gen, base, *member, method, args, result_type);
        }
    }

    let Type::Function(signature) = gen.contextualize(&callee.ty) else {
        return Err(LoweringError::NotCallable { ty: callee.ty.clone() });
    };
    let function = emit_rvalue(gen, callee);
    if function.is_error() {
        return Ok(Value::error(result_type));
    }

    let args = emit_arguments(gen, &signature.params, args);
    Ok(gen.builder.build_apply(function, args, result_type).or_fatal())
}

fn emit_method_call(
    gen: &mut FunctionEmitter,
    base: &Expr,
    member: DeclId,
    method: &FunDecl,
    args: &[Expr],
    result_type: VilType,
) -> Result<Value, LoweringError> {
    let ast = gen.ast();
    if base.ty.is_existential() {
        return Err(LoweringError::ExistentialDispatch {
            member: ast.decl(member).name.clone(),
            ty: base.ty.clone(),
        });
    }
    let Type::Function(signature) = gen.contextualize(&ast.decl(member).ty) else {
        return Err(LoweringError::NotCallable { ty: ast.decl(member).ty.clone() });
    };

    let mut values = Vec::with_capacity(args.len() + 1);
    if method.is_member {
        let receiver = if method.is_mutating {
            emit_lvalue(gen, base)
        } else {
            emit_rvalue(gen, base)
        };
        values.push(receiver);
    }
    values.extend(emit_arguments(gen, &signature.params, args));

    let function = gen.emitter.declare_function(gen.builder, member);
    Ok(gen.builder.build_apply(function, values, result_type).or_fatal())
}

/// Lowers call arguments against the callee's parameter types.
///
/// `inout` parameters take the argument's location. Existential parameters
/// given a value of another type take it through a coercion.
fn emit_arguments(gen: &mut FunctionEmitter, params: &[Type], args: &[Expr]) -> Vec<Value> {
    if params.len() != args.len() {
        fatal!("call with {} argument(s) to a function taking {}", args.len(), params.len());
    }

    params
        .iter()
        .zip(args)
        .map(|(param, arg)| match param {
            Type::Inout(_) => emit_lvalue(gen, arg),
            _ if param.is_existential() && !arg.ty.is_error() && gen.contextualize(&arg.ty) != *param => {
                emit_coerced(gen, arg, param)
            }
            _ => emit_rvalue(gen, arg),
        })
        .collect()
}
