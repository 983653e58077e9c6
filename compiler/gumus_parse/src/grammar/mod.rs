//! Grammar productions.
//!
//! Each module extends `Parser` with methods for one part of the grammar:
//!
//! - `mod.rs`: declarations (`değişken`, `sınıf`, `fonksiyon`, `modül`),
//!   blocks and the statement terminator rule
//! - [`stmt`]: statements (`eğer`, loops, `dön`, `yazdır`, `deneme`, ...)
//! - [`expr`]: the expression precedence chain

mod expr;
mod stmt;

use std::rc::Rc;

use gumus_ir::{ClassDecl, Distance, Expr, ExprKind, FunctionDecl, Stmt, StmtKind, TokenKind};
use gumus_stack::ensure_sufficient_stack;

use crate::{ParseError, ParseResult, Parser};

/// Upper bound on parameters and call arguments.
pub(crate) const MAX_PARAMS: usize = 255;

const SEMICOLON_MESSAGE: &str = "GümüşDil'de noktalı virgül kullanılmaz! Modern sözdizimi kullan.";

/// Which kind of callable a `function` production is reading.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionKind {
    Function,
    Method,
}

impl FunctionKind {
    fn label(self) -> &'static str {
        match self {
            FunctionKind::Function => "fonksiyon",
            FunctionKind::Method => "metot",
        }
    }
}

impl Parser<'_> {
    /// Top-level and module-body item.
    pub(crate) fn declaration(&mut self) -> ParseResult<Stmt> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::Var => self.var_declaration(),
            TokenKind::Class => self.class_declaration(),
            TokenKind::Function => self.function_declaration(),
            TokenKind::Module => self.module_declaration(),
            _ => self.statement(),
        })
    }

    /// Item inside a `{ }` block. Modules are top-level only.
    fn block_item(&mut self) -> ParseResult<Stmt> {
        ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::Var => self.var_declaration(),
            TokenKind::Class => self.class_declaration(),
            TokenKind::Function => self.function_declaration(),
            _ => self.statement(),
        })
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let stmt = self.var_clause()?;
        self.terminator()?;
        Ok(stmt)
    }

    /// `değişken name [= expr]` without the terminator, shared with the
    /// for-loop initializer.
    fn var_clause(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        let name = self.cursor.expect_ident("Degisken adi bekleniyor.")?;
        let initializer = if self.cursor.eat(&TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(Stmt::new(StmtKind::Var { name, initializer }, line))
    }

    fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        let decl = self.function(FunctionKind::Function)?;
        Ok(Stmt::new(StmtKind::Function(Rc::new(decl)), line))
    }

    /// `name(params) { body }`; methods may be named `kurucu`.
    fn function(&mut self, kind: FunctionKind) -> ParseResult<FunctionDecl> {
        let label = kind.label();
        let line = self.cursor.current_line();
        let name = if kind == FunctionKind::Method && self.cursor.eat(&TokenKind::Constructor) {
            TokenKind::Constructor.text()
        } else {
            self.cursor.expect_ident(&format!("{label} adi bekleniyor."))?
        };
        self.cursor
            .expect(&TokenKind::LParen, &format!("{label} adindan sonra '(' bekleniyor."))?;

        let mut params = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                if params.len() >= MAX_PARAMS {
                    return Err(self.cursor.error_here("255'ten fazla parametre olamaz."));
                }
                params.push(self.cursor.expect_ident("Parametre adi bekleniyor.")?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor
            .expect(&TokenKind::RParen, "Parametrelerden sonra ')' bekleniyor.")?;
        self.cursor
            .expect(&TokenKind::LBrace, &format!("{label} govdesi icin '{{' bekleniyor."))?;
        let body = self.block()?;

        Ok(FunctionDecl {
            name,
            params,
            body,
            line,
        })
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        let name = self.cursor.expect_ident("Sinif adi bekleniyor.")?;

        let superclass = if self.cursor.eat(&TokenKind::Lt) {
            let super_line = self.cursor.current_line();
            let super_name = self.cursor.expect_ident("Ust sinif adi bekleniyor.")?;
            Some(Expr::new(
                ExprKind::Variable {
                    name: super_name,
                    distance: Distance::unresolved(),
                },
                super_line,
            ))
        } else {
            None
        };

        self.cursor
            .expect(&TokenKind::LBrace, "Sinif govdesi icin '{' bekleniyor.")?;

        let mut methods = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Newline) {
                continue;
            }
            let is_method = self.cursor.eat(&TokenKind::Function)
                || self.cursor.check(&TokenKind::Constructor)
                || self.cursor.check_ident();
            if !is_method {
                return Err(self
                    .cursor
                    .error_here("Sinif icinde sadece metotlar tanimlanabilir."));
            }
            methods.push(Rc::new(self.function(FunctionKind::Method)?));
        }
        self.cursor
            .expect(&TokenKind::RBrace, "Sinif govdesinden sonra '}' bekleniyor.")?;

        tracing::trace!(class = %name, methods = methods.len(), "class declaration");
        Ok(Stmt::new(
            StmtKind::Class(ClassDecl {
                name,
                superclass,
                methods,
            }),
            line,
        ))
    }

    /// `modül Name { ... }`. Errors inside the body are recorded and
    /// parsing resumes at the next token.
    fn module_declaration(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        let name = self.cursor.expect_ident("Modul adi bekleniyor.")?;
        self.cursor
            .expect(&TokenKind::LBrace, "Modul govdesi icin '{' bekleniyor.")?;

        let mut body = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Newline) {
                continue;
            }
            match self.declaration() {
                Ok(stmt) => body.push(stmt),
                Err(err) => self.recover_in_block(err),
            }
        }
        self.cursor
            .expect(&TokenKind::RBrace, "Modul govdesi sonunda '}' bekleniyor.")?;
        self.terminator()?;

        Ok(Stmt::new(StmtKind::Module { name, body }, line))
    }

    /// Statements up to the closing `}`. The opening brace has been
    /// consumed.
    pub(crate) fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            if self.cursor.eat(&TokenKind::Newline) {
                continue;
            }
            statements.push(self.block_item()?);
        }
        self.cursor
            .expect(&TokenKind::RBrace, "Blok sonrasinda '}' bekleniyor.")?;
        Ok(statements)
    }

    /// `{ ... }` as a block statement, with `message` when the brace is
    /// missing.
    fn braced_block(&mut self, message: &str) -> ParseResult<Stmt> {
        let line = self.cursor.expect(&TokenKind::LBrace, message)?.line;
        Ok(Stmt::block(self.block()?, line))
    }

    /// End of a simple statement: a newline is consumed, a `;` is
    /// rejected, anything else is left for the caller.
    fn terminator(&mut self) -> ParseResult<()> {
        if self.cursor.check(&TokenKind::Semicolon) {
            return Err(ParseError::syntax(
                self.cursor.current_line(),
                SEMICOLON_MESSAGE,
            ));
        }
        self.cursor.eat(&TokenKind::Newline);
        Ok(())
    }
}
