//! Expression parsing.
//!
//! Precedence, lowest first: assignment, `veya`, `ve`, equality,
//! comparison, term, factor, unary, then the call/property/index chain
//! and primary expressions. Binary nodes carry the line of their
//! operator.

use gumus_ir::{BinaryOp, Distance, Expr, ExprKind, Literal, LogicalOp, TokenKind, UnaryOp};
use gumus_stack::ensure_sufficient_stack;

use super::MAX_PARAMS;
use crate::{ParseError, ParseResult, Parser};

fn equality_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::BangEq => Some(BinaryOp::NotEq),
        _ => None,
    }
}

fn comparison_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

fn term_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn factor_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.assignment())
    }

    /// `target = value`, right associative. Only variables, properties
    /// and index expressions are valid targets.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let target = self.logic_or()?;

        if !self.cursor.check(&TokenKind::Eq) {
            return Ok(target);
        }
        let line = self.cursor.advance().line;
        let value = Box::new(self.expression()?);

        let kind = match target.kind {
            ExprKind::Variable { name, .. } => ExprKind::Assign {
                name,
                value,
                distance: Distance::unresolved(),
            },
            ExprKind::Get { object, name } => ExprKind::Set {
                object,
                name,
                value,
            },
            ExprKind::IndexGet { object, index } => ExprKind::IndexSet {
                object,
                index,
                value,
            },
            _ => return Err(ParseError::parser(line, "Gecersiz atama hedefi.")),
        };
        Ok(Expr::new(kind, line))
    }

    fn logic_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.logic_and()?;
        while self.cursor.check(&TokenKind::Or) {
            let line = self.cursor.advance().line;
            let right = self.logic_and()?;
            left = Expr::new(
                ExprKind::Logical {
                    left: Box::new(left),
                    op: LogicalOp::Or,
                    right: Box::new(right),
                },
                line,
            );
        }
        Ok(left)
    }

    fn logic_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.binary_level(0)?;
        while self.cursor.check(&TokenKind::And) {
            let line = self.cursor.advance().line;
            let right = self.binary_level(0)?;
            left = Expr::new(
                ExprKind::Logical {
                    left: Box::new(left),
                    op: LogicalOp::And,
                    right: Box::new(right),
                },
                line,
            );
        }
        Ok(left)
    }

    /// Left-associative binary levels, from equality (0) down to
    /// factor (3).
    fn binary_level(&mut self, level: usize) -> ParseResult<Expr> {
        const LEVELS: [fn(&TokenKind) -> Option<BinaryOp>; 4] =
            [equality_op, comparison_op, term_op, factor_op];

        let Some(match_op) = LEVELS.get(level) else {
            return self.unary();
        };
        let mut left = self.binary_level(level + 1)?;
        while let Some(op) = match_op(self.cursor.current_kind()) {
            let line = self.cursor.advance().line;
            let right = self.binary_level(level + 1)?;
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                line,
            );
        }
        Ok(left)
    }

    /// `-x`, `!x`, and `yeni` which is accepted and ignored.
    fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.cursor.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::New => {
                self.cursor.advance();
                return ensure_sufficient_stack(|| self.unary());
            }
            _ => return self.call(),
        };
        let line = self.cursor.advance().line;
        let operand = ensure_sufficient_stack(|| self.unary())?;
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            line,
        ))
    }

    /// Primary followed by any number of `(args)`, `.name` and `[index]`.
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::LParen => {
                    self.cursor.advance();
                    expr = self.finish_call(expr)?;
                }
                TokenKind::Dot => {
                    let line = self.cursor.advance().line;
                    let name = self.cursor.expect_member_name("Property adi bekleniyor.")?;
                    expr = Expr::new(
                        ExprKind::Get {
                            object: Box::new(expr),
                            name,
                        },
                        line,
                    );
                }
                TokenKind::LBracket => {
                    let line = self.cursor.advance().line;
                    let index = self.expression()?;
                    self.cursor
                        .expect(&TokenKind::RBracket, "Index'ten sonra ']' bekleniyor.")?;
                    expr = Expr::new(
                        ExprKind::IndexGet {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        line,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Arguments after `(`, which may span lines. The call node carries
    /// the line of the closing paren.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut args = Vec::new();
        self.cursor.skip_newlines();
        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                if args.len() >= MAX_PARAMS {
                    return Err(self.cursor.error_here("255'ten fazla arguman olamaz."));
                }
                args.push(self.expression()?);
                self.cursor.skip_newlines();
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
                self.cursor.skip_newlines();
            }
        }
        let line = self
            .cursor
            .expect(&TokenKind::RParen, "Argumanlardan sonra ')' bekleniyor.")?
            .line;
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            line,
        ))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.cursor.current();
        let line = token.line;
        let literal = match &token.kind {
            TokenKind::True => Some(Literal::Bool(true)),
            TokenKind::False => Some(Literal::Bool(false)),
            TokenKind::Nil => Some(Literal::Nil),
            TokenKind::Int(n) => Some(Literal::Int(*n)),
            TokenKind::Float(x) => Some(Literal::Float(*x)),
            TokenKind::Str(s) => Some(Literal::Str(s.clone())),
            _ => None,
        };
        if let Some(literal) = literal {
            self.cursor.advance();
            return Ok(Expr::new(ExprKind::Literal(literal), line));
        }

        match &token.kind {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::ColonColon) {
                    let member = self.cursor.expect_ident("Modul uyesi bekleniyor.")?;
                    return Ok(Expr::new(
                        ExprKind::Scope {
                            module: name.clone(),
                            member,
                        },
                        line,
                    ));
                }
                Ok(Expr::new(
                    ExprKind::Variable {
                        name: name.clone(),
                        distance: Distance::unresolved(),
                    },
                    line,
                ))
            }
            TokenKind::Super => {
                self.cursor.advance();
                self.cursor
                    .expect(&TokenKind::Dot, "'ata' dan sonra '.' bekleniyor.")?;
                let method = self.cursor.expect_member_name("Metot adi bekleniyor.")?;
                Ok(Expr::new(
                    ExprKind::Super {
                        method,
                        distance: Distance::unresolved(),
                    },
                    line,
                ))
            }
            TokenKind::SelfKw => {
                self.cursor.advance();
                Ok(Expr::new(
                    ExprKind::This {
                        distance: Distance::unresolved(),
                    },
                    line,
                ))
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let expr = self.expression()?;
                self.cursor
                    .expect(&TokenKind::RParen, "Ifadeden sonra ')' bekleniyor.")?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                self.list_literal(line)
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                self.map_literal(line)
            }
            _ => Err(self.cursor.error_here("Ifade bekleniyor.")),
        }
    }

    /// `[a, b, ...]` after the `[`. Newlines and a trailing comma are
    /// allowed.
    fn list_literal(&mut self, line: u32) -> ParseResult<Expr> {
        let mut elements = Vec::new();
        self.cursor.skip_newlines();
        while !self.cursor.check(&TokenKind::RBracket) {
            elements.push(self.expression()?);
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }
        self.cursor
            .expect(&TokenKind::RBracket, "Liste sonunda ']' bekleniyor.")?;
        Ok(Expr::new(ExprKind::List(elements), line))
    }

    /// `{key: value, ...}` after the `{`. A bare identifier key is taken
    /// as a string.
    fn map_literal(&mut self, line: u32) -> ParseResult<Expr> {
        let mut entries = Vec::new();
        self.cursor.skip_newlines();
        while !self.cursor.check(&TokenKind::RBrace) {
            let key = if let TokenKind::Ident(name) = self.cursor.current_kind() {
                let key_line = self.cursor.advance().line;
                Expr::new(ExprKind::Literal(Literal::Str(name.clone())), key_line)
            } else {
                self.expression()?
            };
            self.cursor.skip_newlines();
            self.cursor
                .expect(&TokenKind::Colon, "Sozluk anahtarindan sonra ':' bekleniyor.")?;
            self.cursor.skip_newlines();
            let value = self.expression()?;
            entries.push((key, value));

            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }
        self.cursor
            .expect(&TokenKind::RBrace, "Sozluk sonunda '}' bekleniyor.")?;
        Ok(Expr::new(ExprKind::Map(entries), line))
    }
}
