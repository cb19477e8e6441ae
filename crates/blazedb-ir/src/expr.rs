// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions
//!
//! This module represents the restricted SQL expression language BlazeDB
//! evaluates: column references, integer literals, `+`/`×` arithmetic,
//! the six comparisons, and `AND`.
//!
//! ## Design
//!
//! Unlike a general-purpose SQL IR, [`Expr`] is a *sealed* sum type over
//! only the node kinds the evaluator can run to completion. There is no
//! catch-all "other expression" variant. A parser that cannot lower a
//! piece of SQL into one of these variants must reject the query instead
//! of handing the core an expression it cannot evaluate. This keeps
//! `blazedb_core::eval` total over its input domain.
//!
//! ## Examples
//!
//! ```
//! use blazedb_ir::{BinaryOp, ColumnRef, Expr};
//!
//! // R.B > 15
//! let predicate = Expr::BinaryOp {
//!     left: Box::new(Expr::Column(ColumnRef::new("R", "B"))),
//!     op: BinaryOp::Gt,
//!     right: Box::new(Expr::Literal(15)),
//! };
//! assert!(matches!(predicate, Expr::BinaryOp { op: BinaryOp::Gt, .. }));
//! ```

use serde::{Deserialize, Serialize};

/// A BlazeDB expression: predicate or arithmetic term, never both at once
/// (the evaluator decides which interpretation applies from context).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Column reference (qualified or bare; the planner qualifies bare
    /// names against the enclosing schema before the evaluator sees them).
    Column(ColumnRef),

    /// A signed 64-bit integer literal.
    Literal(i64),

    /// Binary operation: arithmetic, comparison, or logical `AND`.
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// `SUM(expr)`, only ever appears as a top-level aggregation argument,
    /// never nested inside another expression.
    Sum(Box<Expr>),

    /// Synthetic per-row literal contribution, substituted by the planner
    /// for `SUM(<integer literal>)` (see `blazedb_core::planner`). Not
    /// produced by the parser.
    RowLiteral(i64),

    /// Parenthesization. Transparent to evaluation; kept as a distinct
    /// node only so the parser doesn't need to special-case precedence
    /// when re-entering `parse_expr`.
    Paren(Box<Expr>),
}

/// Column reference, optionally table-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Table (or alias) name. `None` for a bare, unqualified reference;
    /// the planner must resolve it against exactly one table before the
    /// evaluator runs, or reject the query as ambiguous.
    pub table: Option<String>,
    /// Column name.
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
        }
    }

    pub fn bare(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }

    /// The fully qualified `Table.Column` form, or just `Column` if
    /// unqualified.
    pub fn qualified(&self) -> String {
        match &self.table {
            Some(table) => format!("{table}.{}", self.column),
            None => self.column.clone(),
        }
    }
}

/// Binary operators: arithmetic, comparison, and logical `AND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Mul,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Mul)
    }
}
