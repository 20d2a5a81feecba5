//! Expression lowering
//!
//! Expressions are lowered in one of two modes. Value mode produces a
//! register value. Location mode produces the address of the storage the
//! expression denotes, and fails for expressions that denote none.
//!
//! A failure is reported at the expression's span and the expression is
//! replaced by the error value, so lowering can continue.

mod assignments;
mod calls;
mod identifiers;
mod lvalues;
mod members;

pub use assignments::{emit_assign, emit_assign_expr, emit_assign_value, emit_coerced};
pub use calls::emit_call;
pub use identifiers::{emit_decl_ref, emit_decl_value};
pub use lvalues::lvalue;
pub use members::emit_member_ref;

use vil_ast::{Expr, ExprKind};
use vil_ir::{Value, VilType};
use crate::{FunctionEmitter, LoweringError};

/// Lowers `expr` as a value.
pub fn emit_rvalue(gen: &mut FunctionEmitter, expr: &Expr) -> Value {
    if expr.ty.is_error() {
        return Value::error(VilType::lower(&expr.ty));
    }

    match rvalue(gen, expr) {
        Ok(value) => value,
        Err(error) => {
            gen.report(error, &expr.span);
            Value::error(VilType::lower(&expr.ty))
        }
    }
}

/// Lowers `expr` as a location.
pub fn emit_lvalue(gen: &mut FunctionEmitter, expr: &Expr) -> Value {
    match lvalue(gen, expr) {
        Ok(location) => location,
        Err(error) => {
            gen.report(error, &expr.span);
            Value::error(VilType::address(expr.ty.base().clone()))
        }
    }
}

pub fn rvalue(gen: &mut FunctionEmitter, expr: &Expr) -> Result<Value, LoweringError> {
    match &expr.kind {
        ExprKind::BoolLiteral(value) => Ok(Value::bool(*value)),
        ExprKind::IntLiteral(value) => Ok(Value::int(*value)),
        ExprKind::FloatLiteral(value) => Ok(Value::float(*value)),
        ExprKind::StringLiteral(value) => Ok(Value::string(value.clone())),
        ExprKind::DeclRef(decl) => emit_decl_ref(gen, *decl),
        ExprKind::MemberRef { base, member } => emit_member_ref(gen, base, *member),
        ExprKind::Call { callee, args } => emit_call(gen, callee, args, expr),
        ExprKind::Assign { target, value } => {
            emit_assign_expr(gen, target, value);
            Ok(Value::unit())
        }
        ExprKind::AddrOf(operand) => lvalue(gen, operand),
        ExprKind::Error => Ok(Value::error(VilType::lower(&expr.ty))),
    }
}
