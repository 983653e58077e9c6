//! Cooking layer: raw tokens to [`Token`]s.
//!
//! Attaches line/column positions, checks identifiers against the
//! misspelling table, turns oversized integer literals into floats, and
//! expands template strings into ordinary tokens.

use gumus_ir::{Token, TokenKind};
use logos::Logos;

use crate::misspellings::{lookup_misspelling, Correction};
use crate::raw_token::{RawError, RawToken};
use crate::LexError;

/// Name of the native used to stringify template interpolations.
const STRINGIFY_NATIVE: &str = "metin";

/// Byte offset to 1-based line/column.
pub(crate) struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        LineIndex {
            source,
            line_starts,
        }
    }

    /// Columns count characters, not bytes.
    pub(crate) fn position(&self, offset: usize) -> (u32, u32) {
        let idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[idx];
        let column = self.source[line_start..offset].chars().count() + 1;
        (to_u32(idx + 1), to_u32(column))
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mode {
    /// Whole unit, runs to end of input.
    TopLevel,
    /// Inside `{ }` of a template string; stops at the matching `}` and
    /// drops newlines.
    Interpolation,
}

pub(crate) struct Cooker<'src> {
    source: &'src str,
    index: LineIndex<'src>,
    tokens: Vec<Token>,
}

impl<'src> Cooker<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Cooker {
            source,
            index: LineIndex::new(source),
            tokens: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> Result<Vec<Token>, LexError> {
        let end = self.scan(0, Mode::TopLevel)?;
        self.push(TokenKind::Eof, end);
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, offset: usize) {
        let (line, column) = self.index.position(offset);
        self.tokens.push(Token::new(kind, line, column));
    }

    /// Lex from `start`. Returns the offset just past the last consumed
    /// character (past the closing `}` in interpolation mode).
    fn scan(&mut self, start: usize, mode: Mode) -> Result<usize, LexError> {
        let source = self.source;
        let mut raw = RawToken::lexer(&source[start..]);
        let mut depth = 0usize;

        while let Some(result) = raw.next() {
            let span = raw.span();
            let (abs_start, abs_end) = (start + span.start, start + span.end);
            let line = self.index.position(abs_start).0;

            let token = match result {
                Ok(token) => token,
                Err(RawError::UnterminatedString) => {
                    return Err(LexError::UnterminatedString { line });
                }
                Err(RawError::Unrecognized) => {
                    let character = source[abs_start..].chars().next().unwrap_or('\0');
                    return Err(LexError::UnknownCharacter {
                        character,
                        code: u32::from(character),
                        line,
                    });
                }
            };

            let kind = match token {
                RawToken::Newline if mode == Mode::Interpolation => continue,
                RawToken::TemplateStart => {
                    let resume = self.scan_template(abs_start, abs_end)?;
                    raw.bump(resume - abs_end);
                    continue;
                }
                RawToken::LBrace if mode == Mode::Interpolation => {
                    depth += 1;
                    TokenKind::LBrace
                }
                RawToken::RBrace if mode == Mode::Interpolation => {
                    if depth == 0 {
                        return Ok(abs_end);
                    }
                    depth -= 1;
                    TokenKind::RBrace
                }
                RawToken::LoneAmp => return Err(LexError::LoneOperator { character: '&', line }),
                RawToken::LonePipe => return Err(LexError::LoneOperator { character: '|', line }),
                RawToken::Ident => cook_ident(raw.slice(), line)?,
                RawToken::Int => cook_int(raw.slice()),
                other => convert_simple(other),
            };
            self.push(kind, abs_start);
        }

        Ok(source.len())
    }

    /// Expand `$"..."` starting at `dollar`; `body` is just past the quote.
    ///
    /// `$"a{e}b"` becomes `"" + "a" + metin ( e ) + "b"`. Returns the
    /// offset just past the closing quote.
    fn scan_template(&mut self, dollar: usize, body: usize) -> Result<usize, LexError> {
        let source = self.source;
        let start_line = self.index.position(dollar).0;
        self.push(TokenKind::Str(String::new()), dollar);

        let mut pos = body;
        loop {
            self.push(TokenKind::Plus, pos);
            let rest = &source[pos..];
            let Some(stop) = rest.find(['"', '{']) else {
                return Err(LexError::UnterminatedString { line: start_line });
            };
            self.push(TokenKind::Str(rest[..stop].to_owned()), pos);
            pos += stop;

            if rest[stop..].starts_with('"') {
                return Ok(pos + 1);
            }

            self.push(TokenKind::Plus, pos);
            self.push(TokenKind::Ident(STRINGIFY_NATIVE.to_owned()), pos);
            self.push(TokenKind::LParen, pos);
            let after = self.scan(pos + 1, Mode::Interpolation)?;
            if after >= source.len() && !source[..after].ends_with('}') {
                return Err(LexError::UnterminatedString { line: start_line });
            }
            self.push(TokenKind::RParen, after - 1);
            pos = after;
        }
    }
}

fn cook_ident(slice: &str, line: u32) -> Result<TokenKind, LexError> {
    match lookup_misspelling(slice) {
        None => Ok(TokenKind::Ident(slice.to_owned())),
        Some(Correction::Keyword { shown, correct }) => Err(LexError::Misspelled {
            shown,
            correct,
            line,
        }),
        Some(Correction::Loop) => Err(LexError::LoopMisspelled {
            word: slice.to_owned(),
            line,
        }),
    }
}

/// Integers that do not fit in `i64` become floats.
fn cook_int(slice: &str) -> TokenKind {
    match slice.parse::<i64>() {
        Ok(n) => TokenKind::Int(n),
        Err(_) => TokenKind::Float(slice.parse::<f64>().unwrap_or(f64::INFINITY)),
    }
}

fn convert_simple(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Newline => TokenKind::Newline,
        RawToken::Var => TokenKind::Var,
        RawToken::Print => TokenKind::Print,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::Loop => TokenKind::Loop,
        RawToken::Function => TokenKind::Function,
        RawToken::Return => TokenKind::Return,
        RawToken::Class => TokenKind::Class,
        RawToken::Module => TokenKind::Module,
        RawToken::SelfKw => TokenKind::SelfKw,
        RawToken::Super => TokenKind::Super,
        RawToken::Constructor => TokenKind::Constructor,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Nil => TokenKind::Nil,
        RawToken::Try => TokenKind::Try,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::New => TokenKind::New,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Colon => TokenKind::Colon,
        RawToken::ColonColon => TokenKind::ColonColon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Str(s) => TokenKind::Str(s),
        RawToken::Float(f) => TokenKind::Float(f),
        // Handled by the caller before conversion.
        RawToken::Int
        | RawToken::Ident
        | RawToken::TemplateStart
        | RawToken::LoneAmp
        | RawToken::LonePipe => TokenKind::Eof,
    }
}
