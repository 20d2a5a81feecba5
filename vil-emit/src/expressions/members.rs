//! Member references

use vil_ast::{DeclId, DeclKind, Expr};
use vil_ir::Value;
use crate::{FunctionEmitter, LoweringError, OrFatal};
use super::{emit_rvalue, lvalue};

/// Value of the stored member `member` of `base`
///
/// The member is read through the base's location when it has one.
/// Otherwise the base value is first spilled to a temporary location.
pub fn emit_member_ref(gen: &mut FunctionEmitter, base: &Expr, member: DeclId) -> Result<Value, LoweringError> {
    let ast = gen.ast();
    let node = ast.decl(member);
    match &node.kind {
        DeclKind::Var(v) if v.has_storage => {}
        DeclKind::Fun(_) => {
            return Err(LoweringError::Unsupported {
                construct: format!("unapplied reference to method '{}'", node.name),
            })
        }
        _ => {
            return Err(LoweringError::Unsupported {
                construct: format!("reference to member {} '{}'", node.kind_name(), node.name),
            })
        }
    }
    if base.ty.is_existential() {
        return Err(LoweringError::ExistentialDispatch {
            member: node.name.clone(),
            ty: base.ty.clone(),
        });
    }

    let record = match lvalue(gen, base) {
        Ok(location) => location,
        Err(_) => {
            let value = emit_rvalue(gen, base);
            let base_type = gen.contextualize(&base.ty);
            let temporary = gen.builder.build_alloc_stack(base_type).or_fatal();
            gen.builder.build_store(value, temporary.clone()).or_fatal();
            temporary
        }
    };

    let member_type = gen.contextualize(&node.ty);
    let address = gen
        .builder
        .build_record_member_addr(record, member, &node.name, member_type)
        .or_fatal();
    Ok(gen.builder.build_load(address).or_fatal())
}
