//! Statement lowering

mod declarations;
mod jumps;

pub use declarations::{emit_local_binding, emit_local_decl, emit_local_function, emit_local_var};
pub use jumps::emit_return;

use vil_ast::{BraceStmt, Stmt};
use crate::expressions::emit_rvalue;
use crate::{FunctionEmitter, LoweringDiagnostic};

/// How control leaves a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Control continues with the next statement
    Fallthrough,
    /// The statement returned; whatever follows is unreachable
    Return,
    /// The statement returned and the block skipped the code after it
    Unreachable,
}

/// Lowers a block of statements.
///
/// Statements after one that returns are never executed: the first of them
/// is diagnosed and none of them is lowered. Enclosing blocks stop without
/// diagnosing again.
pub fn emit_brace(gen: &mut FunctionEmitter, brace: &BraceStmt) -> Flow {
    let ast = gen.ast();
    for (i, stmt) in brace.stmts.iter().enumerate() {
        match emit_stmt(gen, stmt) {
            Flow::Fallthrough => continue,
            Flow::Unreachable => return Flow::Unreachable,
            Flow::Return => {}
        }

        let Some(next) = brace.stmts.get(i + 1) else {
            return Flow::Return;
        };
        if gen.emitter.options.diagnose_unreachable_code {
            gen.emitter.report(LoweringDiagnostic::CodeAfterReturnNeverExecuted {
                span: next.span(ast).clone(),
            });
        }
        return Flow::Unreachable;
    }
    Flow::Fallthrough
}

pub fn emit_stmt(gen: &mut FunctionEmitter, stmt: &Stmt) -> Flow {
    match stmt {
        Stmt::Decl(decl) => {
            emit_local_decl(gen, *decl);
            Flow::Fallthrough
        }
        Stmt::Brace(brace) => emit_brace(gen, brace),
        Stmt::Return(ret) => {
            emit_return(gen, ret);
            Flow::Return
        }
        Stmt::Expr(expr) => {
            emit_rvalue(gen, expr);
            Flow::Fallthrough
        }
    }
}
