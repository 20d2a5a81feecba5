//! Declaration references

use vil_ast::{DeclId, DeclKind};
use vil_common::SourceSpan;
use vil_ir::{Value, VilType};
use crate::{FunctionEmitter, LoweringError, OrFatal};

/// Value of the declaration `decl`
///
/// Locals bound to a location are loaded. Functions that are not bound
/// locally are referred to directly, builtins through a builtin reference.
pub fn emit_decl_ref(gen: &mut FunctionEmitter, decl: DeclId) -> Result<Value, LoweringError> {
    if let Some(value) = gen.locals.get(decl).cloned() {
        if value.is_address() && !value.is_error() {
            return Ok(gen.builder.build_load(value).or_fatal());
        }
        return Ok(value);
    }

    let ast = gen.ast();
    let node = ast.decl(decl);
    match &node.kind {
        DeclKind::Fun(fun) if fun.is_builtin() => Ok(Value::builtin(node.name.clone(), node.ty.clone())),
        DeclKind::Fun(fun) if fun.is_member => Err(LoweringError::Unsupported {
            construct: format!("reference to method '{}' without a receiver", node.name),
        }),
        DeclKind::Fun(_) => {
            let captures = ast.captures(decl);
            if captures.is_empty() {
                return Ok(gen.emitter.declare_function(gen.builder, decl));
            }
            if decl != gen.decl {
                return Err(LoweringError::Unsupported {
                    construct: format!("reference to local function '{}' before its declaration", node.name),
                });
            }

            // A capturing function referring to itself closes over its own captures.
            let args = captures
                .iter()
                .map(|capture| {
                    gen.locals.get(*capture).cloned().ok_or_else(|| LoweringError::UnboundDeclaration {
                        name: ast.decl(*capture).name.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let function = gen.emitter.declare_function(gen.builder, decl);
            let closure_type = gen.contextualize(&node.ty);
            Ok(gen.builder.build_partial_apply(function, args, closure_type).or_fatal())
        }
        DeclKind::Var(_) | DeclKind::FunParam(_) => Err(LoweringError::UnboundDeclaration {
            name: node.name.clone(),
        }),
        _ => Err(LoweringError::Unsupported {
            construct: format!("reference to {} '{}' as a value", node.kind_name(), node.name),
        }),
    }
}

/// Value of `decl`, reporting failures at `span`
pub fn emit_decl_value(gen: &mut FunctionEmitter, decl: DeclId, span: &SourceSpan) -> Value {
    match emit_decl_ref(gen, decl) {
        Ok(value) => value,
        Err(error) => {
            gen.report(error, span);
            Value::error(VilType::lower(gen.ast().decl(decl).ty.base()))
        }
    }
}
