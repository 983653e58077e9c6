//! Statement parsing.

use gumus_ir::{Expr, ExprKind, Literal, Stmt, StmtKind, TokenKind};

use crate::{ParseResult, Parser};

impl Parser<'_> {
    pub(crate) fn statement(&mut self) -> ParseResult<Stmt> {
        match self.cursor.current_kind() {
            TokenKind::If => {
                let line = self.cursor.advance().line;
                self.if_statement(line)
            }
            TokenKind::Loop => self.loop_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Print => self.print_statement(),
            TokenKind::Try => self.try_catch_statement(),
            TokenKind::Break => self.simple_statement(StmtKind::Break),
            TokenKind::Continue => self.simple_statement(StmtKind::Continue),
            _ => self.expression_statement(),
        }
    }

    fn simple_statement(&mut self, kind: StmtKind) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        self.terminator()?;
        Ok(Stmt::new(kind, line))
    }

    /// `eğer cond { } [değilse eğer ... | değilse { }]`. The `eğer`
    /// keyword has been consumed.
    fn if_statement(&mut self, line: u32) -> ParseResult<Stmt> {
        let condition = self.expression()?;
        let then_branch = self.braced_block("If govdesi icin '{' bekleniyor.")?;

        let else_branch = if self.cursor.eat(&TokenKind::Else) {
            if self.cursor.check(&TokenKind::If) {
                let else_line = self.cursor.advance().line;
                Some(Box::new(self.if_statement(else_line)?))
            } else {
                Some(Box::new(
                    self.braced_block("Else govdesi icin '{' bekleniyor.")?,
                ))
            }
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch: Box::new(then_branch),
                else_branch,
            },
            line,
        ))
    }

    /// `döngü` / `her` in all its forms:
    ///
    /// - `döngü { }` and `döngü () { }`: infinite loop
    /// - `döngü [(] cond [)] { }`: while loop
    /// - `döngü [(] init; cond; incr [)] { }`: for loop, where `init` is
    ///   a `değişken` clause or an expression and every clause may be empty
    fn loop_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        let parenthesized = self.cursor.eat(&TokenKind::LParen);

        if self.cursor.check(&TokenKind::Var) {
            let initializer = self.var_clause()?;
            self.cursor
                .expect(&TokenKind::Semicolon, "For dongusu kosulundan sonra ';' bekleniyor.")?;
            return self.for_rest(line, parenthesized, Some(initializer));
        }

        let clause_empty = match self.cursor.current_kind() {
            TokenKind::RParen | TokenKind::Semicolon => true,
            TokenKind::LBrace => !parenthesized,
            _ => false,
        };
        let head = if clause_empty {
            None
        } else {
            Some(self.expression()?)
        };

        if self.cursor.eat(&TokenKind::Semicolon) {
            let initializer = head.map(|expr| {
                let expr_line = expr.line;
                Stmt::new(StmtKind::Expression(expr), expr_line)
            });
            return self.for_rest(line, parenthesized, initializer);
        }

        if parenthesized {
            self.cursor
                .expect(&TokenKind::RParen, "Kosuldan sonra ')' bekleniyor.")?;
        }
        let body = self.braced_block("While govdesi icin '{' bekleniyor.")?;
        let condition =
            head.unwrap_or_else(|| Expr::new(ExprKind::Literal(Literal::Bool(true)), line));

        Ok(Stmt::new(
            StmtKind::While {
                condition,
                body: Box::new(body),
            },
            line,
        ))
    }

    /// Condition, increment and body of a for loop. The initializer and
    /// its `;` have been consumed.
    fn for_rest(
        &mut self,
        line: u32,
        parenthesized: bool,
        initializer: Option<Stmt>,
    ) -> ParseResult<Stmt> {
        let condition = if self.cursor.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor
            .expect(&TokenKind::Semicolon, "For dongusu kosulundan sonra ';' bekleniyor.")?;

        let increment = if self.cursor.check(&TokenKind::RParen)
            || self.cursor.check(&TokenKind::LBrace)
        {
            None
        } else {
            Some(self.expression()?)
        };
        if parenthesized {
            self.cursor
                .expect(&TokenKind::RParen, "For dongusu sonrasinda ')' bekleniyor.")?;
        }
        let body = self.braced_block("Dongu govdesi icin '{' bekleniyor.")?;

        Ok(Stmt::new(
            StmtKind::For {
                initializer: initializer.map(Box::new),
                condition,
                increment,
                body: Box::new(body),
            },
            line,
        ))
    }

    /// `dön [value]`. The value must start on the same line.
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        let ends_here = matches!(
            self.cursor.current_kind(),
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Newline | TokenKind::Eof
        ) || self.cursor.current_line() != line;
        let value = if ends_here {
            None
        } else {
            Some(self.expression()?)
        };
        self.terminator()?;
        Ok(Stmt::new(StmtKind::Return(value), line))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        let value = self.expression()?;
        self.terminator()?;
        Ok(Stmt::new(StmtKind::Print(value), line))
    }

    /// `deneme { } yakala (name) { }`
    fn try_catch_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.cursor.advance().line;
        let body = self.braced_block("Try blogu icin '{' bekleniyor.")?;

        self.cursor.skip_newlines();
        self.cursor
            .expect(&TokenKind::Catch, "'deneme' sonrasinda 'yakala' bekleniyor.")?;
        self.cursor
            .expect(&TokenKind::LParen, "'yakala' sonrasinda '(' bekleniyor.")?;
        let error_name = self.cursor.expect_ident("Hata degiskeni adi bekleniyor.")?;
        self.cursor
            .expect(&TokenKind::RParen, "Hata degiskeninden sonra ')' bekleniyor.")?;
        let handler = self.braced_block("Catch blogu icin '{' bekleniyor.")?;

        Ok(Stmt::new(
            StmtKind::TryCatch {
                body: Box::new(body),
                error_name,
                handler: Box::new(handler),
            },
            line,
        ))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        let line = expr.line;
        self.terminator()?;
        Ok(Stmt::new(StmtKind::Expression(expr), line))
    }
}
