//! VIL lowering - Emitter
//!
//! Transforms a type-checked AST into VIL. The entry point is [`lower`],
//! which walks a module declaration and returns the produced IR module along
//! with the diagnostics reported on the way.
//!
//! Problems come in two flavors. User-facing issues (a missing return value,
//! unreachable code, an expression that cannot be lowered) are reported as
//! diagnostics and lowering continues. Violations of the invariants the type
//! checker guarantees are internal compiler errors: they abort by panicking.

use vil_ast::{Ast, DeclId};
use vil_common::{CompilerError, DiagnosticSet};
use vil_ir::{Builder, BuilderError, Module};

/// Aborts lowering on an internal invariant violation.
macro_rules! fatal {
    ($($arg:tt)*) => {
        panic!("internal compiler error: {}", format_args!($($arg)*))
    };
}

mod diagnostics;
mod errors;
mod function;
mod mangle;
mod options;
mod symbols;
pub mod emitter;
pub mod expressions;
pub mod statements;

pub use diagnostics::LoweringDiagnostic;
pub use emitter::Emitter;
pub use errors::LoweringError;
pub use function::FunctionEmitter;
pub use mangle::Mangler;
pub use options::EmitOptions;
pub use symbols::SymbolTable;

/// Result of lowering a module
#[derive(Debug, Clone)]
pub struct Lowered {
    pub module: Module,
    pub diagnostics: DiagnosticSet,
}

impl Lowered {
    /// The module, unless an error-severity diagnostic was reported
    pub fn into_result(self) -> Result<Module, CompilerError> {
        if self.diagnostics.contains_error() {
            Err(self.diagnostics.into())
        } else {
            Ok(self.module)
        }
    }
}

/// Lowers the module declaration `module` of `ast` to VIL.
pub fn lower(ast: &Ast, module: DeclId, options: EmitOptions) -> Lowered {
    let mut builder = Builder::new(options.module_name.clone());
    let mut emitter = Emitter::new(ast, options);
    emitter.emit_module(&mut builder, module);

    Lowered {
        module: builder.finish(),
        diagnostics: emitter.into_diagnostics(),
    }
}

/// Escalates builder misuse, which only a bug in the emitter can cause.
pub(crate) trait OrFatal<T> {
    fn or_fatal(self) -> T;
}

impl<T> OrFatal<T> for Result<T, BuilderError> {
    fn or_fatal(self) -> T {
        self.unwrap_or_else(|error| fatal!("{error}"))
    }
}
