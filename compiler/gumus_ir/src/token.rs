//! Token model.

use std::fmt;

/// A token with its source position.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based source line.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, line: u32, column: u32) -> Self {
        Token { kind, line, column }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}:{}", self.kind, self.line, self.column)
    }
}

/// Token kinds.
///
/// Keyword variants are named after their role; [`TokenKind::text`] gives
/// the Turkish spelling.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (digits without a dot).
    Int(i64),
    /// Float literal (`digits.digits`, or an integer too large for `i64`).
    Float(f64),
    /// String literal with escapes already applied.
    Str(String),
    /// Identifier.
    Ident(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    EqEq,
    Bang,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `&&` or `ve`.
    And,
    /// `||` or `veya`.
    Or,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    ColonColon,
    Semicolon,
    Newline,

    // Keywords
    /// `değişken`
    Var,
    /// `yazdır`
    Print,
    /// `eğer`
    If,
    /// `değilse`
    Else,
    /// `döngü` or `her`
    Loop,
    /// `fonksiyon`
    Function,
    /// `dön`
    Return,
    /// `sınıf`
    Class,
    /// `modül`
    Module,
    /// `öz`
    SelfKw,
    /// `ata`
    Super,
    /// `kurucu`
    Constructor,
    /// `doğru`
    True,
    /// `yanlış`
    False,
    /// `boş`
    Nil,
    /// `deneme`
    Try,
    /// `yakala`
    Catch,
    /// `kır` or `dur`
    Break,
    /// `devam`
    Continue,
    /// `yeni`
    New,

    Eof,
}

impl TokenKind {
    /// Canonical source spelling of this token.
    pub fn text(&self) -> String {
        let fixed = match self {
            TokenKind::Int(n) => return n.to_string(),
            TokenKind::Float(f) => return f.to_string(),
            TokenKind::Str(s) => return format!("\"{s}\""),
            TokenKind::Ident(name) => return name.clone(),
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Bang => "!",
            TokenKind::BangEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::And => "ve",
            TokenKind::Or => "veya",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Semicolon => ";",
            TokenKind::Newline => "\\n",
            TokenKind::Var => "değişken",
            TokenKind::Print => "yazdır",
            TokenKind::If => "eğer",
            TokenKind::Else => "değilse",
            TokenKind::Loop => "döngü",
            TokenKind::Function => "fonksiyon",
            TokenKind::Return => "dön",
            TokenKind::Class => "sınıf",
            TokenKind::Module => "modül",
            TokenKind::SelfKw => "öz",
            TokenKind::Super => "ata",
            TokenKind::Constructor => "kurucu",
            TokenKind::True => "doğru",
            TokenKind::False => "yanlış",
            TokenKind::Nil => "boş",
            TokenKind::Try => "deneme",
            TokenKind::Catch => "yakala",
            TokenKind::Break => "kır",
            TokenKind::Continue => "devam",
            TokenKind::New => "yeni",
            TokenKind::Eof => "",
        };
        fixed.to_string()
    }

    /// Whether this is a reserved word.
    ///
    /// Reserved words are still accepted as property names after `.`.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::Print
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Loop
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::Class
                | TokenKind::Module
                | TokenKind::SelfKw
                | TokenKind::Super
                | TokenKind::Constructor
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::New
        )
    }

    /// Whether this token can begin a statement for recovery purposes.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::Class
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Loop
                | TokenKind::Return
                | TokenKind::Print
        )
    }

    /// Same variant, ignoring any payload.
    #[inline]
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
