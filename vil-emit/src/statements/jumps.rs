//! Return statements

use vil_ast::ReturnStmt;
use vil_ir::Value;
use crate::expressions::{emit_coerced, emit_rvalue};
use crate::{FunctionEmitter, OrFatal};

/// Lowers `return [value]`.
///
/// In a constructor the receiver is returned by the epilogue: the statement
/// only evaluates its operand and ends the block.
pub fn emit_return(gen: &mut FunctionEmitter, stmt: &ReturnStmt) {
    if gen.fun().is_ctor() {
        if let Some(value) = &stmt.value {
            emit_rvalue(gen, value);
        }
        return;
    }

    let return_type = gen.return_type();
    let value = match &stmt.value {
        Some(expr)
            if return_type.is_existential()
                && !expr.ty.is_error()
                && gen.contextualize(&expr.ty) != return_type =>
        {
            emit_coerced(gen, expr, &return_type)
        }
        Some(expr) => emit_rvalue(gen, expr),
        None => Value::unit(),
    };
    gen.builder.build_ret(value).or_fatal();
}
