//! Parse error type.

use gumus_diagnostic::{Diagnostic, DiagnosticKind};
use thiserror::Error;

/// A recoverable parse error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: DiagnosticKind,
    pub line: u32,
    pub message: String,
}

impl ParseError {
    /// Grammar error.
    pub fn parser(line: u32, message: impl Into<String>) -> Self {
        ParseError {
            kind: DiagnosticKind::ParserError,
            line,
            message: message.into(),
        }
    }

    /// Statement terminator rule.
    pub fn syntax(line: u32, message: impl Into<String>) -> Self {
        ParseError {
            kind: DiagnosticKind::SyntaxError,
            line,
            message: message.into(),
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic::new(err.kind, err.line, err.message)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
