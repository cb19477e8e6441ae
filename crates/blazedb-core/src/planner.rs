// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Planner
//!
//! Turns a parsed [`SelectStatement`] plus a [`Catalog`] into an operator
//! tree and its output schema. This is the largest module in the crate;
//! every other component (scan, select, join, project, distinct, sort,
//! aggregate, the evaluator) is assembled here, in the order `SPEC_FULL.md`
//! §4.9 lays out:
//!
//! 1. Enumerate tables (`FROM` first, then each `JOIN`'s table).
//! 2. Scan each table, resolving its CSV path and schema through the
//!    catalog.
//! 3. Qualify every bare column reference in the query against the known
//!    table schemas (ambiguous or unresolvable references are rejected).
//! 4. Split `WHERE` into local (single-table) and join (two-table)
//!    conjuncts by recursive descent through `AND`, growing the left-deep
//!    join tree one table at a time. Explicit `JOIN ... ON` predicates are
//!    folded into this same conjunct pool before the split, so `ON` and
//!    `WHERE` are just two syntactic sources for the same join-predicate
//!    extraction: a comma-join with a `WHERE` equi-join condition and an
//!    explicit `JOIN ... ON` plan identically.
//! 5. Project down to the columns actually needed downstream.
//! 6. Apply `DISTINCT` (explicit, or implicit under `GROUP BY` without a
//!    `SUM`).
//! 7. Sort, if `ORDER BY` is present.
//! 8. Apply the final projection that matches the `SELECT` list exactly.
//!
//! ## A deliberate reordering of steps 8 and 9
//!
//! `SPEC_FULL.md` lists "final projection" (step 8) before "`ORDER BY`"
//! (step 9). Read as strict operator nesting, that order cannot be right:
//! scenario 5 (`SELECT R.A FROM R ORDER BY R.B DESC`) sorts by a column
//! that the final `SELECT` list does not include. `Sort` must therefore
//! run against the wider, needed-columns schema, the one built in step 5,
//! with the exact-`SELECT`-list projection applied on top of it, not
//! underneath. This implementation sorts before the final narrowing
//! projection; see `DESIGN.md` for the full rationale.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use blazedb_catalog::Catalog;
use blazedb_ir::{BinaryOp, ColumnRef, Expr, SelectItem, SelectStatement, SortDirection};

use crate::error::{BlazeError, BlazeResult};
use crate::operators::aggregate::AggregateOperator;
use crate::operators::distinct::DuplicateEliminationOperator;
use crate::operators::join::JoinOperator;
use crate::operators::project::ProjectOperator;
use crate::operators::scan::{OpenReader, ScanOperator};
use crate::operators::select::SelectOperator;
use crate::operators::sort::SortOperator;
use crate::operators::Operator;
use crate::schema::Schema;

/// Opens a fresh reader for a resolved CSV path. `Rc` because the same
/// factory is reused to build an [`OpenReader`] for every table scan in
/// one query; there is no concurrency to require `Arc`.
pub type FileOpener = Rc<dyn Fn(&Path) -> std::io::Result<Box<dyn std::io::BufRead>>>;

/// Plan a query: resolve tables through `catalog`, build the operator
/// tree, and return it alongside its output schema.
pub fn plan(query: &SelectStatement, catalog: &dyn Catalog, opener: FileOpener) -> BlazeResult<(Box<dyn Operator>, Schema)> {
    let table_refs = query.tables();
    let table_names: Vec<String> = table_refs.iter().map(|t| t.name.clone()).collect();

    let mut raw_scans: Vec<Box<dyn Operator>> = Vec::with_capacity(table_names.len());
    let mut table_schemas: Vec<(String, Schema)> = Vec::with_capacity(table_names.len());
    for name in &table_names {
        let path = catalog.csv_path(name)?;
        let reader = make_open_reader(opener.clone(), path.clone());
        let scan: Box<dyn Operator> = match catalog.declared_columns(name) {
            Some(columns) => Box::new(ScanOperator::headerless(name.clone(), path, columns, reader)?),
            None => Box::new(ScanOperator::headered(name.clone(), path, reader)?),
        };
        table_schemas.push((name.clone(), scan.schema().clone()));
        raw_scans.push(scan);
    }

    let qualified_projection: Vec<SelectItem> = query
        .projection
        .iter()
        .map(|item| match item {
            SelectItem::Wildcard => Ok(SelectItem::Wildcard),
            SelectItem::Expr(expr) => Ok(SelectItem::Expr(qualify_expr(expr, &table_schemas)?)),
        })
        .collect::<BlazeResult<_>>()?;
    for item in &qualified_projection {
        if let SelectItem::Expr(expr) = item {
            if !matches!(expr, Expr::Column(_) | Expr::Sum(_)) {
                return Err(BlazeError::Unsupported(
                    "SELECT list items must be a column reference, SUM(...), or *".to_string(),
                ));
            }
        }
    }

    let qualified_where = query.where_clause.as_ref().map(|expr| qualify_expr(expr, &table_schemas)).transpose()?;

    let qualified_group_by: Vec<Expr> =
        query.group_by.iter().map(|expr| qualify_expr(expr, &table_schemas)).collect::<BlazeResult<_>>()?;
    if qualified_group_by.len() > 1 {
        return Err(BlazeError::Unsupported("GROUP BY supports at most one expression".to_string()));
    }

    let qualified_order_by: Vec<(Expr, SortDirection)> = query
        .order_by
        .iter()
        .map(|ob| Ok((qualify_expr(&ob.expr, &table_schemas)?, ob.direction)))
        .collect::<BlazeResult<_>>()?;

    let mut conjuncts: Vec<Expr> = qualified_where.as_ref().map(flatten_and).unwrap_or_default();
    for join in &query.joins {
        if let Some(on) = &join.on {
            conjuncts.extend(flatten_and(&qualify_expr(on, &table_schemas)?));
        }
    }
    let mut consumed = vec![false; conjuncts.len()];

    let mut filtered_scans: Vec<Box<dyn Operator>> = Vec::with_capacity(raw_scans.len());
    for (i, scan) in raw_scans.into_iter().enumerate() {
        let table = &table_names[i];
        let mut local_preds = Vec::new();
        for (j, conjunct) in conjuncts.iter().enumerate() {
            if consumed[j] {
                continue;
            }
            let tables = referenced_tables(conjunct);
            if tables.len() == 1 && tables.contains(table) {
                local_preds.push(conjunct.clone());
                consumed[j] = true;
            }
        }
        let op: Box<dyn Operator> = match fold_and(local_preds) {
            Some(predicate) => Box::new(SelectOperator::new(scan, predicate)),
            None => scan,
        };
        filtered_scans.push(op);
    }

    let mut scans = filtered_scans.into_iter();
    let mut root = scans.next().ok_or_else(|| BlazeError::InvariantViolation("query has no tables".to_string()))?;
    let mut left_tables: HashSet<String> = HashSet::new();
    left_tables.insert(table_names[0].clone());

    for (offset, right_op) in scans.enumerate() {
        let right_table = &table_names[offset + 1];
        let mut join_preds = Vec::new();
        for (j, conjunct) in conjuncts.iter().enumerate() {
            if consumed[j] {
                continue;
            }
            let tables = referenced_tables(conjunct);
            if tables.len() == 2 && tables.contains(right_table) && tables.iter().any(|t| t != right_table && left_tables.contains(t)) {
                join_preds.push(conjunct.clone());
                consumed[j] = true;
            }
        }
        let predicate = fold_and(join_preds);
        root = Box::new(JoinOperator::new(root, right_op, predicate)?);
        left_tables.insert(right_table.clone());
    }

    let mut residual = Vec::new();
    for (j, conjunct) in conjuncts.iter().enumerate() {
        if consumed[j] {
            continue;
        }
        if referenced_tables(conjunct).len() >= 3 {
            return Err(BlazeError::Unsupported(
                "WHERE predicates referencing three or more tables are not supported".to_string(),
            ));
        }
        residual.push(conjunct.clone());
    }
    if let Some(predicate) = fold_and(residual) {
        root = Box::new(SelectOperator::new(root, predicate));
    }

    let is_aggregation = qualified_projection.iter().any(|item| matches!(item, SelectItem::Expr(Expr::Sum(_))));

    if is_aggregation {
        plan_aggregation(root, &qualified_projection, &qualified_group_by, &qualified_order_by)
    } else {
        plan_projection(root, query.distinct, &qualified_projection, &qualified_where, &qualified_group_by, &qualified_order_by)
    }
}

fn plan_projection(
    root: Box<dyn Operator>,
    distinct: bool,
    projection: &[SelectItem],
    where_clause: &Option<Expr>,
    group_by: &[Expr],
    order_by: &[(Expr, SortDirection)],
) -> BlazeResult<(Box<dyn Operator>, Schema)> {
    let has_wildcard = projection.iter().any(|item| matches!(item, SelectItem::Wildcard));

    let needed: Vec<String> = if has_wildcard {
        root.schema().names().to_vec()
    } else {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for item in projection {
            if let SelectItem::Expr(expr) = item {
                collect_columns(expr, &mut seen, &mut columns);
            }
        }
        if let Some(where_clause) = where_clause {
            collect_columns(where_clause, &mut seen, &mut columns);
        }
        for expr in group_by {
            collect_columns(expr, &mut seen, &mut columns);
        }
        for (expr, _) in order_by {
            collect_columns(expr, &mut seen, &mut columns);
        }
        columns
    };

    let mut pipeline: Box<dyn Operator> = Box::new(ProjectOperator::new(root, needed.clone())?);

    if distinct || !group_by.is_empty() {
        pipeline = Box::new(DuplicateEliminationOperator::new(pipeline));
    }

    if !order_by.is_empty() {
        for (expr, _) in order_by {
            if !matches!(expr, Expr::Column(_)) {
                return Err(BlazeError::Unsupported("ORDER BY expressions must be column references".to_string()));
            }
        }
        pipeline = Box::new(SortOperator::new(pipeline, order_by.to_vec()));
    }

    let final_columns: Vec<String> = if has_wildcard {
        needed
    } else {
        projection
            .iter()
            .map(|item| match item {
                SelectItem::Expr(Expr::Column(col)) => col.qualified(),
                _ => unreachable!("non-wildcard projection items were validated to be columns above"),
            })
            .collect()
    };

    let root_op: Box<dyn Operator> = Box::new(ProjectOperator::new(pipeline, final_columns)?);
    let schema = root_op.schema().clone();
    Ok((root_op, schema))
}

fn plan_aggregation(
    root: Box<dyn Operator>,
    projection: &[SelectItem],
    group_by: &[Expr],
    order_by: &[(Expr, SortDirection)],
) -> BlazeResult<(Box<dyn Operator>, Schema)> {
    if group_by.is_empty() {
        let mut sum_originals = Vec::new();
        let mut sum_exprs = Vec::new();
        for item in projection {
            match item {
                SelectItem::Expr(Expr::Sum(inner)) => {
                    sum_originals.push((**inner).clone());
                    sum_exprs.push(rewrite_literal_sum(inner));
                }
                _ => {
                    return Err(BlazeError::Unsupported(
                        "ungrouped aggregation requires every SELECT item to be SUM(...)".to_string(),
                    ));
                }
            }
        }
        let mut pipeline: Box<dyn Operator> = Box::new(AggregateOperator::new(root, None, sum_exprs)?);

        if !order_by.is_empty() {
            let mut keys = Vec::with_capacity(order_by.len());
            for (expr, direction) in order_by {
                let Expr::Sum(inner) = expr else {
                    return Err(BlazeError::Unsupported(
                        "ORDER BY in ungrouped aggregation must reference a SELECT list SUM(...)".to_string(),
                    ));
                };
                let position = sum_originals
                    .iter()
                    .position(|original| original == inner.as_ref())
                    .ok_or_else(|| BlazeError::Unsupported("ORDER BY SUM(...) does not match any SELECT list SUM argument".to_string()))?;
                keys.push((Expr::Column(ColumnRef::bare(format!("SUM_{position}"))), *direction));
            }
            pipeline = Box::new(SortOperator::new(pipeline, keys));
        }

        let schema = pipeline.schema().clone();
        Ok((pipeline, schema))
    } else {
        let group_expr = group_by[0].clone();
        if projection.len() != 2 {
            return Err(BlazeError::Unsupported(
                "grouped aggregation SELECT list must have exactly two items: the group column and SUM(...)".to_string(),
            ));
        }
        let sum_inner = projection
            .iter()
            .find_map(|item| match item {
                SelectItem::Expr(Expr::Sum(inner)) => Some((**inner).clone()),
                _ => None,
            })
            .ok_or_else(|| BlazeError::Unsupported("grouped aggregation requires exactly one SUM(...) in the SELECT list".to_string()))?;

        let sum_exprs = vec![rewrite_literal_sum(&sum_inner)];
        let mut pipeline: Box<dyn Operator> = Box::new(AggregateOperator::new(root, Some(group_expr.clone()), sum_exprs)?);

        if !order_by.is_empty() {
            let mut keys = Vec::with_capacity(order_by.len());
            for (expr, direction) in order_by {
                let rewritten = if *expr == group_expr {
                    Expr::Column(ColumnRef::bare("Group"))
                } else if let Expr::Sum(inner) = expr {
                    if **inner == sum_inner {
                        Expr::Column(ColumnRef::bare("SUM"))
                    } else {
                        return Err(BlazeError::Unsupported(
                            "ORDER BY SUM(...) does not match the SELECT list SUM argument".to_string(),
                        ));
                    }
                } else {
                    return Err(BlazeError::Unsupported(
                        "ORDER BY in grouped aggregation must reference the GROUP BY column or SUM(...)".to_string(),
                    ));
                };
                keys.push((rewritten, *direction));
            }
            pipeline = Box::new(SortOperator::new(pipeline, keys));
        }

        let mut final_columns = Vec::with_capacity(2);
        for item in projection {
            match item {
                SelectItem::Expr(expr) if *expr == group_expr => final_columns.push("Group".to_string()),
                SelectItem::Expr(Expr::Sum(_)) => final_columns.push("SUM".to_string()),
                _ => return Err(BlazeError::Unsupported("unexpected grouped aggregation SELECT item".to_string())),
            }
        }
        let root_op: Box<dyn Operator> = Box::new(ProjectOperator::new(pipeline, final_columns)?);
        let schema = root_op.schema().clone();
        Ok((root_op, schema))
    }
}

fn make_open_reader(opener: FileOpener, path: PathBuf) -> OpenReader {
    Box::new(move || opener(&path))
}

/// Replace a bare column reference with the one table it unambiguously
/// belongs to. Already-qualified references pass through unchanged.
fn qualify_expr(expr: &Expr, tables: &[(String, Schema)]) -> BlazeResult<Expr> {
    Ok(match expr {
        Expr::Column(col) => Expr::Column(qualify_column(col, tables)?),
        Expr::Literal(value) => Expr::Literal(*value),
        Expr::RowLiteral(value) => Expr::RowLiteral(*value),
        Expr::BinaryOp { left, op, right } => Expr::BinaryOp {
            left: Box::new(qualify_expr(left, tables)?),
            op: *op,
            right: Box::new(qualify_expr(right, tables)?),
        },
        Expr::Sum(inner) => Expr::Sum(Box::new(qualify_expr(inner, tables)?)),
        Expr::Paren(inner) => Expr::Paren(Box::new(qualify_expr(inner, tables)?)),
    })
}

fn qualify_column(col: &ColumnRef, tables: &[(String, Schema)]) -> BlazeResult<ColumnRef> {
    if col.table.is_some() {
        return Ok(col.clone());
    }
    let suffix = format!(".{}", col.column);
    let mut found: Option<&str> = None;
    for (table, schema) in tables {
        if schema.index_of(&format!("{table}{suffix}")).is_some() {
            if found.is_some() {
                return Err(BlazeError::SchemaMiss(format!("column '{}' is ambiguous across tables", col.column)));
            }
            found = Some(table);
        }
    }
    found
        .map(|table| ColumnRef::new(table, col.column.clone()))
        .ok_or_else(|| BlazeError::SchemaMiss(col.column.clone()))
}

/// Split a `WHERE` clause into its top-level `AND` conjuncts, descending
/// through parentheses transparently.
fn flatten_and(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::BinaryOp { left, op: BinaryOp::And, right } => {
            let mut conjuncts = flatten_and(left);
            conjuncts.extend(flatten_and(right));
            conjuncts
        }
        Expr::Paren(inner) => flatten_and(inner),
        other => vec![other.clone()],
    }
}

fn referenced_tables(expr: &Expr) -> HashSet<String> {
    let mut tables = HashSet::new();
    collect_tables(expr, &mut tables);
    tables
}

fn collect_tables(expr: &Expr, out: &mut HashSet<String>) {
    match expr {
        Expr::Column(col) => {
            if let Some(table) = &col.table {
                out.insert(table.clone());
            }
        }
        Expr::Literal(_) | Expr::RowLiteral(_) => {}
        Expr::BinaryOp { left, right, .. } => {
            collect_tables(left, out);
            collect_tables(right, out);
        }
        Expr::Sum(inner) | Expr::Paren(inner) => collect_tables(inner, out),
    }
}

fn collect_columns(expr: &Expr, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    match expr {
        Expr::Column(col) => {
            let qualified = col.qualified();
            if seen.insert(qualified.clone()) {
                out.push(qualified);
            }
        }
        Expr::Literal(_) | Expr::RowLiteral(_) => {}
        Expr::BinaryOp { left, right, .. } => {
            collect_columns(left, seen, out);
            collect_columns(right, seen, out);
        }
        Expr::Sum(inner) | Expr::Paren(inner) => collect_columns(inner, seen, out),
    }
}

fn fold_and(mut exprs: Vec<Expr>) -> Option<Expr> {
    let first = exprs.pop()?;
    Some(exprs.into_iter().fold(first, |acc, expr| Expr::BinaryOp {
        left: Box::new(acc),
        op: BinaryOp::And,
        right: Box::new(expr),
    }))
}

fn rewrite_literal_sum(inner: &Expr) -> Expr {
    match inner {
        Expr::Literal(value) => Expr::RowLiteral(*value),
        other => other.clone(),
    }
}
