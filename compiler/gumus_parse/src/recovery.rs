//! Panic-mode recovery and the per-line error cap.

use gumus_ir::TokenKind;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::Cursor;

/// Errors on one line beyond this count trigger a warning and skip the
/// rest of the line.
pub const MAX_ERRORS_PER_LINE: u32 = 3;

/// Skip tokens until a statement boundary.
///
/// Stops once the previous token was a `;` or newline, or the current
/// token starts a statement.
pub fn synchronize(cursor: &mut Cursor<'_>) {
    synchronize_until(cursor, false);
}

/// [`synchronize`] that also stops before a `}`, so a `modül` body keeps
/// its closing brace.
pub(crate) fn synchronize_in_block(cursor: &mut Cursor<'_>) {
    synchronize_until(cursor, true);
}

fn synchronize_until(cursor: &mut Cursor<'_>, stop_at_brace: bool) {
    while !cursor.is_at_end() {
        if stop_at_brace && cursor.check(&TokenKind::RBrace) {
            return;
        }
        if matches!(
            cursor.previous().kind,
            TokenKind::Semicolon | TokenKind::Newline
        ) {
            return;
        }
        if cursor.current_kind().starts_statement() {
            return;
        }
        cursor.advance();
    }
}

/// Skip the rest of the current line, consuming its newline.
pub(crate) fn skip_line(cursor: &mut Cursor<'_>) {
    skip_line_until(cursor, false);
}

/// [`skip_line`] that leaves a `}` on the line unconsumed.
pub(crate) fn skip_line_in_block(cursor: &mut Cursor<'_>) {
    skip_line_until(cursor, true);
}

fn skip_line_until(cursor: &mut Cursor<'_>, stop_at_brace: bool) {
    if matches!(cursor.previous().kind, TokenKind::Newline) {
        return;
    }
    while !cursor.is_at_end() {
        if stop_at_brace && cursor.check(&TokenKind::RBrace) {
            return;
        }
        if matches!(cursor.advance().kind, TokenKind::Newline) {
            return;
        }
    }
}

/// What to do after an error has been counted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum LineVerdict {
    /// Under the cap: resynchronize normally.
    Resync,
    /// Over the cap: drop the rest of the line. `warn` is set only the
    /// first time a line goes over.
    SkipLine { warn: bool },
}

/// Counts errors per source line.
#[derive(Default, Debug)]
pub(crate) struct LineErrors {
    counts: FxHashMap<u32, u32>,
    warned: FxHashSet<u32>,
}

impl LineErrors {
    pub(crate) fn record(&mut self, line: u32) -> LineVerdict {
        let count = self.counts.entry(line).or_insert(0);
        *count += 1;
        if *count > MAX_ERRORS_PER_LINE {
            LineVerdict::SkipLine {
                warn: self.warned.insert(line),
            }
        } else {
            LineVerdict::Resync
        }
    }
}
