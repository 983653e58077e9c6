//! The [`Diagnostic`] record and its kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which stage produced a diagnostic.
///
/// Serialized as the snake-case `type` string that tooling matches on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Unknown character, lone `&`/`|`, unterminated string.
    LexerError,
    /// Misspelled keyword, `;` terminator.
    SyntaxError,
    /// Grammar error reported by the parser.
    ParserError,
    /// Parser gave up on the rest of a line.
    ParserWarning,
    /// Error raised while evaluating.
    RuntimeError,
    /// `dahil_et` could not find or load a file.
    ImportError,
    /// Source file could not be read.
    FileError,
    /// Anything outside the language proper (I/O on stdout, internal faults).
    SystemError,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::LexerError => "lexer_error",
            DiagnosticKind::SyntaxError => "syntax_error",
            DiagnosticKind::ParserError => "parser_error",
            DiagnosticKind::ParserWarning => "parser_warning",
            DiagnosticKind::RuntimeError => "runtime_error",
            DiagnosticKind::ImportError => "import_error",
            DiagnosticKind::FileError => "file_error",
            DiagnosticKind::SystemError => "system_error",
        }
    }

    /// Warnings do not make a unit fail.
    #[inline]
    pub fn is_warning(self) -> bool {
        matches!(self, DiagnosticKind::ParserWarning)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    pub line: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            line,
            message: message.into(),
            file: None,
            suggestion: None,
        }
    }

    pub fn lexer(line: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::LexerError, line, message)
    }

    pub fn syntax(line: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::SyntaxError, line, message)
    }

    pub fn parser(line: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::ParserError, line, message)
    }

    pub fn runtime(line: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::RuntimeError, line, message)
    }

    /// Attach the file the diagnostic refers to.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attach a suggested name ("did you mean").
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a file only if none is set yet.
    #[must_use]
    pub fn or_file(mut self, file: &str) -> Self {
        if self.file.is_none() {
            self.file = Some(file.to_owned());
        }
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        !self.kind.is_warning()
    }

    /// The single-line JSON form written to the diagnostics stream.
    pub fn to_json(&self) -> String {
        // A derived Serialize over strings and integers cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!("{{\"type\": \"{}\", \"line\": {}}}", self.kind, self.line)
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] satir {}: {}", self.kind, self.line, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (Bunu mu demek istediniz: '{suggestion}'?)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
