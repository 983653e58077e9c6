//! Lexer error type.
//!
//! Every lexical error is fatal to the unit being lexed.

use gumus_diagnostic::{Diagnostic, DiagnosticKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Bilinmeyen karakter: '{character}' (ASCII: {code})")]
    UnknownCharacter { character: char, code: u32, line: u32 },
    /// A single `&` or `|`.
    #[error("Beklenmeyen karakter: '{character}' (Kullanim: {character}{character})")]
    LoneOperator { character: char, line: u32 },
    #[error("Sonlandirilmamis Metin (Tirnak isareti eksik)")]
    UnterminatedString { line: u32 },
    #[error("❌ {shown} değil, '{correct}' yazılmalı! (Türkçe karakter kullan)")]
    Misspelled {
        shown: &'static str,
        correct: &'static str,
        line: u32,
    },
    #[error("❌ Döngüler için 'döngü' veya 'her' yazılmalı! (Türkçe karakter kullan)")]
    LoopMisspelled { word: String, line: u32 },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnknownCharacter { line, .. }
            | LexError::LoneOperator { line, .. }
            | LexError::UnterminatedString { line }
            | LexError::Misspelled { line, .. }
            | LexError::LoopMisspelled { line, .. } => *line,
        }
    }

    /// Misspellings are reported as syntax errors, the rest as lexer errors.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            LexError::Misspelled { .. } | LexError::LoopMisspelled { .. } => {
                DiagnosticKind::SyntaxError
            }
            _ => DiagnosticKind::LexerError,
        }
    }
}

impl From<&LexError> for Diagnostic {
    fn from(err: &LexError) -> Self {
        Diagnostic::new(err.kind(), err.line(), err.to_string())
    }
}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Diagnostic::from(&err)
    }
}
