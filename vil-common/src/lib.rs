//! VIL lowering - Common Types and Utilities
//! 
//! This crate contains shared types, diagnostics and source locations
//! used across the AST, the IR and the emitter.

pub mod error;
pub mod types;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, DiagnosticSet, Severity};
pub use types::*;
pub use source_loc::{SourceLocation, SourceSpan};
