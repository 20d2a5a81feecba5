//! Location-mode lowering

use vil_ast::{DeclKind, Expr, ExprKind, Type};
use vil_ir::{Value, VilType};
use crate::{FunctionEmitter, LoweringError, OrFatal};

/// Address of the storage `expr` denotes
///
/// Emits nothing when it fails, so callers may fall back to value mode.
pub fn lvalue(gen: &mut FunctionEmitter, expr: &Expr) -> Result<Value, LoweringError> {
    if expr.ty.is_error() {
        return Ok(Value::error(VilType::address(Type::Error)));
    }

    let ast = gen.ast();
    match &expr.kind {
        ExprKind::DeclRef(decl) => match gen.locals.get(*decl) {
            Some(value) if value.is_address() || value.is_error() => Ok(value.clone()),
            Some(_) => Err(LoweringError::NotAddressable { ty: expr.ty.clone() }),
            None => match ast.decl(*decl).kind {
                DeclKind::Var(_) | DeclKind::FunParam(_) => Err(LoweringError::UnboundDeclaration {
                    name: ast.decl(*decl).name.clone(),
                }),
                _ => Err(LoweringError::NotAddressable { ty: expr.ty.clone() }),
            },
        },

        ExprKind::MemberRef { base, member } => {
            let node = ast.decl(*member);
            if !matches!(&node.kind, DeclKind::Var(v) if v.has_storage) {
                return Err(LoweringError::NotAddressable { ty: expr.ty.clone() });
            }
            if base.ty.is_existential() {
                return Err(LoweringError::ExistentialDispatch {
                    member: node.name.clone(),
                    ty: base.ty.clone(),
                });
            }

            let record = lvalue(gen, base)?;
            let member_type = gen.contextualize(&node.ty);
            Ok(gen
                .builder
                .build_record_member_addr(record, *member, &node.name, member_type)
                .or_fatal())
        }

        ExprKind::AddrOf(operand) => lvalue(gen, operand),

        _ => Err(LoweringError::NotAddressable { ty: expr.ty.clone() }),
    }
}
