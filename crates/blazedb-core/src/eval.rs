// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expression evaluator
//!
//! Evaluates a [`blazedb_ir::Expr`] against one tuple and its schema.
//! `eval_int` handles arithmetic/column/literal contexts; `eval_bool`
//! handles predicates. Neither function mutates the tuple, and both are
//! stateless across calls; the evaluator carries no memory between
//! pulls.
//!
//! [`Expr`] is a sealed sum type (see `blazedb_ir::expr`), so these two
//! functions are exhaustive over every node the parser and planner can
//! produce; there is no catch-all "unsupported expression" branch to fall
//! through silently.

use blazedb_ir::{BinaryOp, ColumnRef, Expr};

use crate::error::{BlazeError, BlazeResult};
use crate::schema::Schema;
use crate::tuple::Tuple;

/// Evaluate `expr` as a signed 64-bit integer against `tuple`.
pub fn eval_int(expr: &Expr, tuple: &Tuple, schema: &Schema) -> BlazeResult<i64> {
    match expr {
        Expr::Column(col) => parse_field(col, column_value(col, tuple, schema)?),
        Expr::Literal(value) => Ok(*value),
        Expr::RowLiteral(value) => Ok(*value),
        Expr::Paren(inner) => eval_int(inner, tuple, schema),
        Expr::BinaryOp { left, op, right } if op.is_arithmetic() => {
            let l = eval_int(left, tuple, schema)?;
            let r = eval_int(right, tuple, schema)?;
            Ok(match op {
                BinaryOp::Add => l.wrapping_add(r),
                BinaryOp::Mul => l.wrapping_mul(r),
                _ => unreachable!("guarded by is_arithmetic"),
            })
        }
        Expr::BinaryOp { .. } => Err(BlazeError::Unsupported(
            "expected an integer-valued expression, found a comparison or logical operator".to_string(),
        )),
        Expr::Sum(_) => Err(BlazeError::Unsupported(
            "SUM(...) cannot be evaluated directly; it is only valid as an aggregation argument".to_string(),
        )),
    }
}

/// Evaluate `expr` as a boolean predicate against `tuple`.
pub fn eval_bool(expr: &Expr, tuple: &Tuple, schema: &Schema) -> BlazeResult<bool> {
    match expr {
        Expr::Paren(inner) => eval_bool(inner, tuple, schema),
        Expr::BinaryOp { left, op: BinaryOp::And, right } => {
            Ok(eval_bool(left, tuple, schema)? && eval_bool(right, tuple, schema)?)
        }
        Expr::BinaryOp { left, op, right } if op.is_comparison() => eval_comparison(*op, left, right, tuple, schema),
        other => Err(BlazeError::Unsupported(format!(
            "expected a boolean expression, found {other:?}"
        ))),
    }
}

fn eval_comparison(op: BinaryOp, left: &Expr, right: &Expr, tuple: &Tuple, schema: &Schema) -> BlazeResult<bool> {
    match op {
        BinaryOp::Eq | BinaryOp::NotEq => {
            let equal = match (eval_int(left, tuple, schema), eval_int(right, tuple, schema)) {
                (Ok(l), Ok(r)) => l == r,
                _ => eval_text(left, tuple, schema)? == eval_text(right, tuple, schema)?,
            };
            Ok(if op == BinaryOp::Eq { equal } else { !equal })
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let l = eval_int(left, tuple, schema)?;
            let r = eval_int(right, tuple, schema)?;
            Ok(match op {
                BinaryOp::Lt => l < r,
                BinaryOp::LtEq => l <= r,
                BinaryOp::Gt => l > r,
                BinaryOp::GtEq => l >= r,
                _ => unreachable!("guarded above"),
            })
        }
        BinaryOp::Add | BinaryOp::Mul | BinaryOp::And => unreachable!("guarded by is_comparison"),
    }
}

/// Raw string form of an expression, used as the equality fallback for
/// operands that don't both parse as integers.
fn eval_text(expr: &Expr, tuple: &Tuple, schema: &Schema) -> BlazeResult<String> {
    match expr {
        Expr::Column(col) => Ok(column_value(col, tuple, schema)?.to_string()),
        Expr::Literal(value) | Expr::RowLiteral(value) => Ok(value.to_string()),
        Expr::Paren(inner) => eval_text(inner, tuple, schema),
        _ => eval_int(expr, tuple, schema).map(|v| v.to_string()),
    }
}

fn column_value<'t>(col: &ColumnRef, tuple: &'t Tuple, schema: &Schema) -> BlazeResult<&'t str> {
    let index = resolve_index(col, schema)?;
    tuple
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| BlazeError::InvariantViolation(format!("tuple width {} has no field {index}", tuple.len())))
}

fn resolve_index(col: &ColumnRef, schema: &Schema) -> BlazeResult<usize> {
    if let Some(index) = schema.index_of(&col.qualified()) {
        return Ok(index);
    }
    if col.table.is_none() {
        let mut matches = schema
            .names()
            .iter()
            .enumerate()
            .filter(|(_, name)| name.ends_with(&format!(".{}", col.column)));
        if let Some((index, _)) = matches.next() {
            if matches.next().is_none() {
                return Ok(index);
            }
            return Err(BlazeError::SchemaMiss(format!(
                "column '{}' is ambiguous across tables",
                col.column
            )));
        }
    }
    Err(BlazeError::SchemaMiss(col.qualified()))
}

fn parse_field(col: &ColumnRef, raw: &str) -> BlazeResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| BlazeError::TypeMismatch(format!("column '{}' value '{raw}' is not an integer", col.qualified())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blazedb_ir::ColumnRef;

    fn schema() -> Schema {
        Schema::new(vec!["R.A".into(), "R.B".into()]).unwrap()
    }

    #[test]
    fn evaluates_column_and_literal() {
        let tuple = vec!["1".to_string(), "10".to_string()];
        let schema = schema();
        assert_eq!(eval_int(&Expr::Column(ColumnRef::new("R", "B")), &tuple, &schema).unwrap(), 10);
        assert_eq!(eval_int(&Expr::Literal(42), &tuple, &schema).unwrap(), 42);
    }

    #[test]
    fn evaluates_arithmetic() {
        let tuple = vec!["1".to_string(), "10".to_string()];
        let schema = schema();
        let expr = Expr::BinaryOp {
            left: Box::new(Expr::Column(ColumnRef::new("R", "B"))),
            op: BinaryOp::Add,
            right: Box::new(Expr::Literal(5)),
        };
        assert_eq!(eval_int(&expr, &tuple, &schema).unwrap(), 15);
    }

    #[test]
    fn evaluates_comparison() {
        let tuple = vec!["1".to_string(), "20".to_string()];
        let schema = schema();
        let expr = Expr::BinaryOp {
            left: Box::new(Expr::Column(ColumnRef::new("R", "B"))),
            op: BinaryOp::Gt,
            right: Box::new(Expr::Literal(15)),
        };
        assert!(eval_bool(&expr, &tuple, &schema).unwrap());
    }

    #[test]
    fn evaluates_and() {
        let tuple = vec!["1".to_string(), "20".to_string()];
        let schema = schema();
        let gt = Expr::BinaryOp {
            left: Box::new(Expr::Column(ColumnRef::new("R", "B"))),
            op: BinaryOp::Gt,
            right: Box::new(Expr::Literal(15)),
        };
        let eq = Expr::BinaryOp {
            left: Box::new(Expr::Column(ColumnRef::new("R", "A"))),
            op: BinaryOp::Eq,
            right: Box::new(Expr::Literal(1)),
        };
        let and = Expr::BinaryOp {
            left: Box::new(gt),
            op: BinaryOp::And,
            right: Box::new(eq),
        };
        assert!(eval_bool(&and, &tuple, &schema).unwrap());
    }

    #[test]
    fn missing_column_is_schema_miss() {
        let tuple = vec!["1".to_string(), "20".to_string()];
        let schema = schema();
        let err = eval_int(&Expr::Column(ColumnRef::new("R", "Z")), &tuple, &schema).unwrap_err();
        assert!(matches!(err, BlazeError::SchemaMiss(_)));
    }

    #[test]
    fn non_integer_field_is_type_mismatch() {
        let tuple = vec!["abc".to_string(), "20".to_string()];
        let schema = schema();
        let err = eval_int(&Expr::Column(ColumnRef::new("R", "A")), &tuple, &schema).unwrap_err();
        assert!(matches!(err, BlazeError::TypeMismatch(_)));
    }

    #[test]
    fn row_literal_contributes_constant() {
        let tuple = vec!["1".to_string(), "20".to_string()];
        let schema = schema();
        assert_eq!(eval_int(&Expr::RowLiteral(1), &tuple, &schema).unwrap(), 1);
    }

    #[test]
    fn sum_is_not_directly_evaluable() {
        let tuple = vec!["1".to_string(), "20".to_string()];
        let schema = schema();
        let expr = Expr::Sum(Box::new(Expr::Column(ColumnRef::new("R", "B"))));
        assert!(matches!(eval_int(&expr, &tuple, &schema), Err(BlazeError::Unsupported(_))));
    }
}
