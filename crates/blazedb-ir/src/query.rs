// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query representation
//!
//! This module represents the supported subset of `SELECT` in the IR:
//! a `FROM` table, zero or more `JOIN`s in syntactic (left-deep) order, an
//! optional `WHERE`, a projection list (or `*`), optional `GROUP BY`,
//! optional `ORDER BY`, and optional `DISTINCT`.
//!
//! There is deliberately no `SetOp` (UNION/INTERSECT/EXCEPT), no CTE, and
//! no window clause; those are out of scope for this engine (see
//! `SPEC_FULL.md`).

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// A parsed `SELECT` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    /// `SELECT DISTINCT` modifier.
    pub distinct: bool,

    /// Projection list, or `*` via [`SelectItem::Wildcard`].
    pub projection: Vec<SelectItem>,

    /// The `FROM` table, followed by zero or more joined tables in
    /// left-to-right syntactic order. This list is the canonical join
    /// order. BlazeDB does no cost-based reordering.
    pub from: TableRef,
    pub joins: Vec<Join>,

    /// Flat `WHERE` clause, combined by `AND` at the top level. The
    /// planner splits this into local and join predicates (see
    /// `blazedb_core::planner`).
    pub where_clause: Option<Expr>,

    /// `GROUP BY` list. The spec (and this implementation) supports at
    /// most one grouping expression.
    pub group_by: Vec<Expr>,

    /// `ORDER BY` list.
    pub order_by: Vec<OrderBy>,
}

impl SelectStatement {
    pub fn new(from: TableRef) -> Self {
        Self {
            distinct: false,
            projection: Vec::new(),
            from,
            joins: Vec::new(),
            where_clause: None,
            group_by: Vec::new(),
            order_by: Vec::new(),
        }
    }

    /// All tables in canonical left-to-right join order: the `FROM` table
    /// first, then each join's right-hand table.
    pub fn tables(&self) -> Vec<&TableRef> {
        let mut tables = vec![&self.from];
        tables.extend(self.joins.iter().map(|j| &j.table));
        tables
    }
}

/// Item in a `SELECT` projection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectItem {
    /// A plain expression, e.g. `R.A` or `SUM(R.B)`.
    Expr(Expr),
    /// `*`, expands to every column of the full join schema.
    Wildcard,
}

/// A table reference in `FROM` or the right-hand side of a `JOIN`. BlazeDB
/// has no subqueries in `FROM`, so this is always a base table name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A `JOIN` clause. BlazeDB only implements inner joins (tuple
/// nested-loop); other join kinds are rejected by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub table: TableRef,
    /// `ON` predicate, if present. Absent means an unconditional
    /// (cross-product) join.
    pub on: Option<Expr>,
}

/// `ORDER BY` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub expr: Expr,
    pub direction: SortDirection,
}

/// Sort direction. `ASC` is the default when unspecified by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}
