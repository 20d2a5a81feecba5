//! VIL - the value intermediate language
//! 
//! An SSA/CFG-style IR with explicit memory locations, produced by the
//! lowering pass from the typed AST.
//! 
//! ## Architecture
//! 
//! - `types` - IR types (source type plus object/address category)
//! - `values` - Instruction operands
//! - `instructions` - IR instructions
//! - `blocks` - Basic blocks with declared parameters
//! - `function` - Functions and their signatures
//! - `witness` - Witness tables of view conformances
//! - `module` - The compilation unit
//! - `builder` - Cursor-based IR construction
//! - `errors` - Builder misuse

pub use self::types::VilType;
pub use self::values::{Value, ValueKind};
pub use self::instructions::Instruction;
pub use self::blocks::BasicBlock;
pub use self::function::{Function, Signature};
pub use self::witness::{WitnessEntry, WitnessTable};
pub use self::module::Module;
pub use self::builder::{Builder, CursorGuard, InsertionPoint};
pub use self::errors::BuilderError;

mod types;
mod values;
mod instructions;
mod blocks;
mod function;
mod witness;
mod module;
mod builder;
mod errors;
