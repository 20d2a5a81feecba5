//! Builder error types

use thiserror::Error;
use vil_common::LabelId;

/// Misuse of the [`Builder`](crate::Builder)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    #[error("No insertion point")]
    NoInsertionPoint,

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Unknown block bb{block} in function '{function}'")]
    UnknownBlock { function: String, block: LabelId },

    #[error("Block bb{block} of function '{function}' is already terminated")]
    BlockTerminated { function: String, block: LabelId },

    #[error("Operand {operand} of {opcode} must be an address")]
    NotAnAddress { opcode: &'static str, operand: String },

    #[error("Function '{name}' redeclared with signature {requested}, previously {existing}")]
    SignatureMismatch {
        name: String,
        existing: String,
        requested: String,
    },
}
