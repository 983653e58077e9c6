//! Recursive descent parser for GümüşDil.
//!
//! Consumes the lexer's token list and produces the statement list of a
//! unit. The parser never gives up on malformed input: each error is
//! recorded as a diagnostic, the parser resynchronizes at the next
//! statement boundary, and parsing continues. A unit with any error is
//! flagged via [`ParseOutput::had_error`] and must not be executed.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::{ParseError, ParseResult};
pub use recovery::{synchronize, MAX_ERRORS_PER_LINE};

use gumus_diagnostic::{Diagnostic, DiagnosticKind};
use gumus_ir::{Stmt, Token, TokenKind};

use recovery::{skip_line, skip_line_in_block, synchronize_in_block, LineErrors, LineVerdict};

/// Everything the parser produced for one unit.
#[derive(Debug, Default)]
pub struct ParseOutput {
    pub statements: Vec<Stmt>,
    /// Errors and warnings in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
    pub had_error: bool,
}

impl ParseOutput {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Parse a token list ending with `Eof`.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseOutput {
    if tokens.is_empty() {
        return ParseOutput::default();
    }
    let output = Parser::new(tokens).parse_program();
    tracing::debug!(
        statements = output.statements.len(),
        diagnostics = output.diagnostics.len(),
        "parsed"
    );
    output
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    diagnostics: Vec<Diagnostic>,
    had_error: bool,
    line_errors: LineErrors,
}

impl<'a> Parser<'a> {
    /// The token list must be non-empty and end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            diagnostics: Vec::new(),
            had_error: false,
            line_errors: LineErrors::default(),
        }
    }

    pub fn parse_program(mut self) -> ParseOutput {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            self.cursor.skip_newlines();
            if self.cursor.is_at_end() {
                break;
            }
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => self.recover(err),
            }
        }
        ParseOutput {
            statements,
            diagnostics: self.diagnostics,
            had_error: self.had_error,
        }
    }

    /// Record `err`, step past the offending token and resynchronize.
    fn recover(&mut self, err: ParseError) {
        self.recover_until(err, false);
    }

    /// [`Self::recover`] inside a `modül` body: the closing `}` is never
    /// skipped.
    pub(crate) fn recover_in_block(&mut self, err: ParseError) {
        self.recover_until(err, true);
    }

    fn recover_until(&mut self, err: ParseError, in_block: bool) {
        let line = err.line;
        self.record(err);
        if !(in_block && self.cursor.check(&TokenKind::RBrace)) {
            self.cursor.advance();
        }
        match self.line_errors.record(line) {
            LineVerdict::Resync if in_block => synchronize_in_block(&mut self.cursor),
            LineVerdict::Resync => synchronize(&mut self.cursor),
            LineVerdict::SkipLine { warn } => {
                if warn {
                    tracing::warn!(line, "too many errors, skipping line");
                    self.diagnostics.push(Diagnostic::new(
                        DiagnosticKind::ParserWarning,
                        line,
                        "Çok fazla hata - satır atlanıyor",
                    ));
                }
                if in_block {
                    skip_line_in_block(&mut self.cursor);
                } else {
                    skip_line(&mut self.cursor);
                }
            }
        }
    }

    fn record(&mut self, err: ParseError) {
        tracing::warn!(line = err.line, message = %err.message, "parse error");
        self.had_error = true;
        self.diagnostics.push(err.into());
    }
}

#[cfg(test)]
mod tests;
