//! Diagnostics reported by the lowering pass

use thiserror::Error;
use vil_common::{Diagnostic, SourceSpan};
use crate::LoweringError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoweringDiagnostic {
    /// Reported at the position right after the function body
    #[error("missing return value in non-unit function")]
    MissingReturnValueInNonUnitFunction { span: SourceSpan },

    /// Reported at the first unreachable statement
    #[error("code after return is never executed")]
    CodeAfterReturnNeverExecuted { span: SourceSpan },

    #[error("cannot lower expression: {error}")]
    UnloweredExpression { error: LoweringError, span: SourceSpan },
}

impl LoweringDiagnostic {
    pub fn span(&self) -> &SourceSpan {
        match self {
            LoweringDiagnostic::MissingReturnValueInNonUnitFunction { span }
            | LoweringDiagnostic::CodeAfterReturnNeverExecuted { span }
            | LoweringDiagnostic::UnloweredExpression { span, .. } => span,
        }
    }
}

impl From<LoweringDiagnostic> for Diagnostic {
    fn from(diagnostic: LoweringDiagnostic) -> Self {
        let message = diagnostic.to_string();
        let span = diagnostic.span().clone();
        match diagnostic {
            LoweringDiagnostic::CodeAfterReturnNeverExecuted { .. } => Diagnostic::warning(message, span),
            LoweringDiagnostic::MissingReturnValueInNonUnitFunction { .. }
            | LoweringDiagnostic::UnloweredExpression { .. } => Diagnostic::error(message, span),
        }
    }
}
