//! Source location tracking for diagnostics
//! 
//! Every AST node carries a span so the emitter can point its diagnostics
//! at the offending source range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }
    
    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Span covering `line:start_column` to `line:end_column` of `filename`
    pub fn on_line(filename: &str, line: u32, start_column: u32, end_column: u32) -> Self {
        Self::new(
            SourceLocation::new(filename, line, start_column),
            SourceLocation::new(filename, line, end_column),
        )
    }
    
    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }
    
    /// Create a dummy span for testing
    pub fn dummy() -> Self {
        Self::from_location(SourceLocation::dummy())
    }

    /// The empty span sitting right after this one
    pub fn end_point(&self) -> SourceSpan {
        Self::from_location(self.end.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.filename != self.end.filename {
            write!(f, "{} to {}", self.start, self.end)
        } else if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}", self.start)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new("main.val", 42, 10);
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert_eq!(format!("{}", loc), "main.val:42:10");
    }

    #[test]
    fn test_source_span_same_line() {
        let span = SourceSpan::on_line("main.val", 1, 5, 10);
        assert_eq!(format!("{}", span), "main.val:1:5-10");
    }

    #[test]
    fn test_source_span_different_lines() {
        let start = SourceLocation::new("main.val", 1, 5);
        let end = SourceLocation::new("main.val", 3, 10);
        let span = SourceSpan::new(start, end);
        
        assert_eq!(format!("{}", span), "main.val:1:5-3:10");
    }

    #[test]
    fn test_end_point_is_empty_span_after_body() {
        let body = SourceSpan::new(
            SourceLocation::new("main.val", 1, 20),
            SourceLocation::new("main.val", 3, 2),
        );
        let end = body.end_point();
        assert!(end.is_empty());
        assert_eq!(end.start, SourceLocation::new("main.val", 3, 2));
        assert_eq!(format!("{}", end), "main.val:3:2");
    }
}
