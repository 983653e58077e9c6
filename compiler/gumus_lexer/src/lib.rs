//! Lexer for GümüşDil.
//!
//! Two layers:
//! - `raw_token`: a logos scanner over the source text
//! - `cooker`: positions, misspelling checks, integer overflow and
//!   template string expansion
//!
//! Newlines are tokens (they end statements); spaces, tabs, carriage
//! returns and `//` comments are skipped. The first lexical error aborts
//! the unit.

mod cooker;
mod escape;
mod lex_error;
mod misspellings;
mod raw_token;

use gumus_ir::Token;

pub use lex_error::LexError;
pub use misspellings::{lookup_misspelling, Correction};

/// Lex a whole unit. The token list always ends with `Eof`.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let result = cooker::Cooker::new(source).run();
    match &result {
        Ok(tokens) => tracing::debug!(count = tokens.len(), "lexed"),
        Err(err) => tracing::debug!(line = err.line(), %err, "lex failed"),
    }
    result
}
