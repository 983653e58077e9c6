//! Raw scanner generated by logos.
//!
//! Produces tokens before cooking: keywords and punctuation are final,
//! but identifiers still need the misspelling check, integer literals
//! still need overflow handling, and `$"` only marks where a template
//! string begins. Template bodies are scanned by the cooker.

use logos::Logos;

use crate::escape::unescape;

/// Failure reported by the raw scanner.
#[derive(Default, Debug, Clone, PartialEq)]
pub(crate) enum RawError {
    /// No rule matched.
    #[default]
    Unrecognized,
    /// A `"` with no closing quote before end of input.
    UnterminatedString,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = RawError)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"//[^\n]*")]
pub(crate) enum RawToken {
    #[token("\n")]
    Newline,

    // === Keywords ===
    #[token("değişken")]
    Var,
    #[token("yazdır")]
    Print,
    #[token("eğer")]
    If,
    #[token("değilse")]
    Else,
    #[token("döngü")]
    #[token("her")]
    Loop,
    #[token("fonksiyon")]
    Function,
    #[token("dön")]
    Return,
    #[token("sınıf")]
    Class,
    #[token("modül")]
    Module,
    #[token("öz")]
    SelfKw,
    #[token("ata")]
    Super,
    #[token("kurucu")]
    Constructor,
    #[token("doğru")]
    True,
    #[token("yanlış")]
    False,
    #[token("boş")]
    Nil,
    #[token("deneme")]
    Try,
    #[token("yakala")]
    Catch,
    #[token("kır")]
    #[token("dur")]
    Break,
    #[token("devam")]
    Continue,
    #[token("yeni")]
    New,
    #[token("ve")]
    #[token("&&")]
    And,
    #[token("veya")]
    #[token("||")]
    Or,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&")]
    LoneAmp,
    #[token("|")]
    LonePipe,

    // === Punctuation ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(";")]
    Semicolon,

    // === Literals ===
    /// `$"`: start of a template string.
    #[token("$\"")]
    TemplateStart,

    #[token("\"", lex_string)]
    Str(String),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    /// Digits only; may not fit in `i64`.
    #[regex(r"[0-9]+")]
    Int,

    /// Any byte at or above 0x80 counts as a letter.
    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Ident,
}

/// Scan a string body after its opening quote.
///
/// Strings may span lines. A backslash always swallows the next character
/// for the purpose of finding the closing quote.
fn lex_string(lex: &mut logos::Lexer<'_, RawToken>) -> Result<String, RawError> {
    let rest = lex.remainder();
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                let body = unescape(&rest[..i]);
                lex.bump(i + 1);
                return Ok(body);
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Err(RawError::UnterminatedString)
}
