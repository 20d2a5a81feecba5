//! Expression lowering error types

use thiserror::Error;
use vil_ast::Type;

/// Reasons an expression cannot be lowered
///
/// These never abort lowering: the emitter reports them as diagnostics and
/// substitutes the error value for the expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoweringError {
    #[error("expression of type {ty} does not denote a location")]
    NotAddressable { ty: Type },

    #[error("member '{member}' of existential type {ty} cannot be dispatched")]
    ExistentialDispatch { member: String, ty: Type },

    #[error("value of type {ty} is not callable")]
    NotCallable { ty: Type },

    #[error("no value is bound to '{name}'")]
    UnboundDeclaration { name: String },

    #[error("{construct} is not supported")]
    Unsupported { construct: String },
}
