//! Token cursor for navigating the token stream.

use gumus_ir::{Token, TokenKind};

use crate::ParseError;

/// Cursor over a token slice.
///
/// Invariant: the slice is non-empty and ends with `Eof`; the position
/// never moves past that last token.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token. Past-the-end reads yield the last token.
    #[inline]
    pub fn current(&self) -> &'a Token {
        let idx = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[idx]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_line(&self) -> u32 {
        self.current().line
    }

    /// The most recently consumed token, or the first token at the start.
    #[inline]
    pub fn previous(&self) -> &'a Token {
        let idx = self.pos.saturating_sub(1).min(self.tokens.len().saturating_sub(1));
        &self.tokens[idx]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check the current token kind, ignoring payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && self.current_kind().same_kind(kind)
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Advance and return the consumed token. Stays put at `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn skip_newlines(&mut self) {
        while self.eat(&TokenKind::Newline) {}
    }

    /// Consume a token of the given kind or fail with `message`.
    pub fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(message))
        }
    }

    /// Consume an identifier and return its name.
    pub fn expect_ident(&mut self, message: &str) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            self.advance();
            Ok(name.clone())
        } else {
            Err(self.error_here(message))
        }
    }

    /// Identifier or any keyword, as used after `.`.
    pub fn expect_member_name(&mut self, message: &str) -> Result<String, ParseError> {
        let kind = self.current_kind();
        match kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name.clone())
            }
            k if k.is_keyword() || matches!(k, TokenKind::And | TokenKind::Or) => {
                self.advance();
                Ok(k.text())
            }
            _ => Err(self.error_here(message)),
        }
    }

    #[cold]
    #[inline(never)]
    pub fn error_here(&self, message: &str) -> ParseError {
        ParseError::parser(self.current_line(), message)
    }
}
