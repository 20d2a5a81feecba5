//! Assignment and coercion
//!
//! Storing a value into a location of another type is where concrete values
//! meet existential containers. A concrete value stored into an existential
//! location is packed into the container. An existential value of another
//! type is copied into it through a reinterpreted address.

use log::trace;
use vil_ast::{Expr, Type};
use vil_ir::{Builder, Value};
use crate::{FunctionEmitter, OrFatal};
use super::{emit_lvalue, emit_rvalue, lvalue};

/// Lowers `target = value`.
pub fn emit_assign_expr(gen: &mut FunctionEmitter, target: &Expr, value: &Expr) {
    let location = emit_lvalue(gen, target);
    emit_assign(gen, value, location);
}

/// Stores the value of `expr` into `location`.
pub fn emit_assign(gen: &mut FunctionEmitter, expr: &Expr, location: Value) {
    if location.is_error() {
        emit_rvalue(gen, expr);
        return;
    }

    let source_type = gen.contextualize(&expr.ty);
    if location.ty.is_existential() && source_type.is_existential() {
        if let Ok(source) = lvalue(gen, expr) {
            if !source.is_error() {
                let source = if source_type != location.ty.val {
                    gen.builder.build_unsafe_cast_addr(source, location.ty.val.clone()).or_fatal()
                } else {
                    source
                };
                gen.builder.build_copy_addr(source, location).or_fatal();
                return;
            }
        }
    }

    let value = emit_rvalue(gen, expr);
    emit_assign_value(gen.builder, value, &source_type, location);
}

/// Stores `value`, of type `value_type`, into `location`.
pub fn emit_assign_value(builder: &mut Builder, value: Value, value_type: &Type, location: Value) {
    if location.is_error() {
        return;
    }

    let target_type = location.ty.val.clone();
    if value.is_error() || *value_type == target_type || (value_type.is_union() && target_type.is_union()) {
        builder.build_store(value, location).or_fatal();
    } else if target_type.is_existential() && value_type.is_existential() {
        trace!("assigning {value_type} to a location of type {target_type} through a cast");
        let temporary = builder.build_alloc_stack(value_type.clone()).or_fatal();
        builder.build_store(value, temporary.clone()).or_fatal();
        let source = builder.build_unsafe_cast_addr(temporary, target_type).or_fatal();
        builder.build_copy_addr(source, location).or_fatal();
    } else if target_type.is_existential() {
        trace!("packing {value_type} into a container of type {target_type}");
        let slot = builder.build_alloc_existential(location, value_type.clone()).or_fatal();
        builder.build_store(value, slot).or_fatal();
    } else {
        builder.build_store(value, location).or_fatal();
    }
}

/// Value of `expr` converted to `target`, through a temporary location
pub fn emit_coerced(gen: &mut FunctionEmitter, expr: &Expr, target: &Type) -> Value {
    let temporary = gen.builder.build_alloc_stack(target.clone()).or_fatal();
    emit_assign(gen, expr, temporary.clone());
    gen.builder.build_load(temporary).or_fatal()
}
