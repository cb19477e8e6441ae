// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Recursive-descent parser
//!
//! Parses the token stream from [`crate::lexer`] into a
//! [`blazedb_ir::SelectStatement`]. This is the "grammar" collaborator
//! `spec.md` §1 treats as external to the core. It exists here only so
//! the workspace runs end-to-end; the planner in `blazedb-core` never
//! inspects tokens or text, only the IR this module produces.
//!
//! ## Grammar (informal)
//!
//! ```text
//! select_stmt := SELECT [DISTINCT] select_list
//!                FROM table_ref (',' table_ref | JOIN table_ref [ON expr])*
//!                [WHERE expr]
//!                [GROUP BY expr]
//!                [ORDER BY order_item (',' order_item)*]
//!
//! select_list := '*' | select_item (',' select_item)*
//! select_item := expr
//!
//! expr        := and_expr (AND and_expr)*
//! and_expr    := add_expr [cmp_op add_expr]
//! add_expr    := mul_expr ('+' mul_expr)*
//! mul_expr    := primary ('*' primary)*
//! primary     := INTEGER
//!              | SUM '(' expr ')'
//!              | IDENT ['.' IDENT]
//!              | '(' expr ')'
//! ```
//!
//! Comma-joins (`FROM R, S WHERE R.A = S.C`) and `JOIN ... ON` joins are
//! both accepted and produce the same IR shape: an unconditional
//! [`blazedb_ir::Join`] for a comma-join, relying on the planner to pull
//! the join predicate out of `WHERE` (§4.9).

use blazedb_ir::{BinaryOp, ColumnRef, Expr, Join, OrderBy, SelectItem, SelectStatement, SortDirection, TableRef};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Token, tokenize};

/// Parse a full `SELECT` statement from SQL text.
pub fn parse_select(input: &str) -> ParseResult<SelectStatement> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let stmt = parser.parse_select_stmt()?;
    parser.expect_eof()?;
    Ok(stmt)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect_eof(&mut self) -> ParseResult<()> {
        match self.peek() {
            Token::Eof => Ok(()),
            other => Err(ParseError::UnexpectedToken {
                expected: "end of query".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }

    fn keyword_ident(&self) -> Option<String> {
        match self.peek() {
            Token::Ident(s) => Some(s.to_ascii_uppercase()),
            _ => None,
        }
    }

    fn eat_keyword(&mut self, kw: &str) -> ParseResult<()> {
        match self.keyword_ident() {
            Some(s) if s == kw => {
                self.advance();
                Ok(())
            }
            other => Err(ParseError::UnexpectedToken {
                expected: kw.to_string(),
                found: other.unwrap_or_else(|| format!("{:?}", self.peek())),
            }),
        }
    }

    fn at_keyword(&self, kw: &str) -> bool {
        self.keyword_ident().as_deref() == Some(kw)
    }

    fn eat_ident(&mut self) -> ParseResult<String> {
        match self.advance() {
            Token::Ident(s) => Ok(s),
            other => Err(ParseError::UnexpectedToken {
                expected: "identifier".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }

    fn parse_select_stmt(&mut self) -> ParseResult<SelectStatement> {
        self.eat_keyword("SELECT")?;

        let distinct = if self.at_keyword("DISTINCT") {
            self.advance();
            true
        } else {
            false
        };

        let projection = self.parse_select_list()?;

        self.eat_keyword("FROM")?;
        let from = TableRef::new(self.eat_ident()?);
        let joins = self.parse_joins()?;

        let where_clause = if self.at_keyword("WHERE") {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.at_keyword("GROUP") {
            self.advance();
            self.eat_keyword("BY")?;
            vec![self.parse_expr()?]
        } else {
            Vec::new()
        };

        let order_by = if self.at_keyword("ORDER") {
            self.advance();
            self.eat_keyword("BY")?;
            self.parse_order_list()?
        } else {
            Vec::new()
        };

        let mut stmt = SelectStatement::new(from);
        stmt.distinct = distinct;
        stmt.projection = projection;
        stmt.joins = joins;
        stmt.where_clause = where_clause;
        stmt.group_by = group_by;
        stmt.order_by = order_by;
        Ok(stmt)
    }

    fn parse_select_list(&mut self) -> ParseResult<Vec<SelectItem>> {
        if matches!(self.peek(), Token::Star) {
            self.advance();
            return Ok(vec![SelectItem::Wildcard]);
        }
        let mut items = vec![SelectItem::Expr(self.parse_select_item_expr()?)];
        while matches!(self.peek(), Token::Comma) {
            self.advance();
            items.push(SelectItem::Expr(self.parse_select_item_expr()?));
        }
        Ok(items)
    }

    /// A select-list item is an expression, but with `SUM` recognized at
    /// this position specifically (SUM never appears nested elsewhere).
    fn parse_select_item_expr(&mut self) -> ParseResult<Expr> {
        self.parse_add_expr()
    }

    fn parse_joins(&mut self) -> ParseResult<Vec<Join>> {
        let mut joins = Vec::new();
        loop {
            if matches!(self.peek(), Token::Comma) {
                self.advance();
                let table = TableRef::new(self.eat_ident()?);
                joins.push(Join { table, on: None });
            } else if self.at_keyword("JOIN") {
                self.advance();
                let table = TableRef::new(self.eat_ident()?);
                let on = if self.at_keyword("ON") {
                    self.advance();
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                joins.push(Join { table, on });
            } else {
                break;
            }
        }
        Ok(joins)
    }

    fn parse_order_list(&mut self) -> ParseResult<Vec<OrderBy>> {
        let mut items = vec![self.parse_order_item()?];
        while matches!(self.peek(), Token::Comma) {
            self.advance();
            items.push(self.parse_order_item()?);
        }
        Ok(items)
    }

    fn parse_order_item(&mut self) -> ParseResult<OrderBy> {
        let expr = self.parse_add_expr()?;
        let direction = if self.at_keyword("DESC") {
            self.advance();
            SortDirection::Desc
        } else if self.at_keyword("ASC") {
            self.advance();
            SortDirection::Asc
        } else {
            SortDirection::Asc
        };
        Ok(OrderBy { expr, direction })
    }

    /// Top-level predicate: conjuncts joined by `AND`.
    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and_operand()?;
        while self.at_keyword("AND") {
            self.advance();
            let right = self.parse_and_operand()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op: BinaryOp::And,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// One `AND` operand: an optional comparison over arithmetic terms.
    fn parse_and_operand(&mut self) -> ParseResult<Expr> {
        let left = self.parse_add_expr()?;
        if let Some(op) = self.peek_comparison_op() {
            self.advance();
            let right = self.parse_add_expr()?;
            return Ok(Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn peek_comparison_op(&self) -> Option<BinaryOp> {
        match self.peek() {
            Token::Eq => Some(BinaryOp::Eq),
            Token::NotEq => Some(BinaryOp::NotEq),
            Token::Lt => Some(BinaryOp::Lt),
            Token::LtEq => Some(BinaryOp::LtEq),
            Token::Gt => Some(BinaryOp::Gt),
            Token::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn parse_add_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_mul_expr()?;
        while matches!(self.peek(), Token::Plus) {
            self.advance();
            let right = self.parse_mul_expr()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op: BinaryOp::Add,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_mul_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_primary()?;
        while matches!(self.peek(), Token::Star) {
            self.advance();
            let right = self.parse_primary()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op: BinaryOp::Mul,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.peek().clone() {
            Token::Integer(value) => {
                self.advance();
                Ok(Expr::Literal(value))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                match self.advance() {
                    Token::RParen => Ok(Expr::Paren(Box::new(inner))),
                    other => Err(ParseError::UnexpectedToken {
                        expected: ")".to_string(),
                        found: format!("{other:?}"),
                    }),
                }
            }
            Token::Ident(name) if name.eq_ignore_ascii_case("SUM") => {
                self.advance();
                match self.advance() {
                    Token::LParen => {}
                    other => {
                        return Err(ParseError::UnexpectedToken {
                            expected: "(".to_string(),
                            found: format!("{other:?}"),
                        });
                    }
                }
                let arg = self.parse_add_expr()?;
                match self.advance() {
                    Token::RParen => {}
                    other => {
                        return Err(ParseError::UnexpectedToken {
                            expected: ")".to_string(),
                            found: format!("{other:?}"),
                        });
                    }
                }
                Ok(Expr::Sum(Box::new(arg)))
            }
            Token::Ident(first) => {
                self.advance();
                if matches!(self.peek(), Token::Dot) {
                    self.advance();
                    let column = self.eat_ident()?;
                    Ok(Expr::Column(ColumnRef::new(first, column)))
                } else {
                    Ok(Expr::Column(ColumnRef::bare(first)))
                }
            }
            other => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }
}
