// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Aggregation operator (`SUM` only)
//!
//! Ungrouped aggregation emits a single row of running sums, one per
//! `SUM` argument (output schema `SUM_0 … SUM_{k-1}`). Grouped aggregation
//! supports exactly one group-by expression and exactly one `SUM`
//! argument (output schema `Group, SUM`), matching `SPEC_FULL.md` §4.8 and
//! §9's explicit instruction not to guess at a multi-`SUM` generalization.
//!
//! Blocking: the entire child is drained on the first pull. `reset`
//! rewinds only the emission cursor, the accumulated sums are not
//! recomputed, and the child is not reset.

use std::collections::HashMap;

use blazedb_ir::Expr;

use crate::error::{BlazeError, BlazeResult};
use crate::eval::eval_int;
use crate::operators::Operator;
use crate::schema::Schema;
use crate::tuple::Tuple;

/// `SUM`-only aggregation, ungrouped or grouped by a single expression.
pub struct AggregateOperator {
    child: Box<dyn Operator>,
    group_by: Option<Expr>,
    sum_exprs: Vec<Expr>,
    child_schema: Schema,
    schema: Schema,
    buffer: Option<Vec<Tuple>>,
    cursor: usize,
}

impl AggregateOperator {
    /// # Errors
    ///
    /// Returns [`BlazeError::Unsupported`] if `group_by` is present and
    /// `sum_exprs` does not contain exactly one expression.
    pub fn new(child: Box<dyn Operator>, group_by: Option<Expr>, sum_exprs: Vec<Expr>) -> BlazeResult<Self> {
        if group_by.is_some() && sum_exprs.len() != 1 {
            return Err(BlazeError::Unsupported(
                "grouped aggregation supports exactly one SUM expression".to_string(),
            ));
        }
        let child_schema = child.schema().clone();
        let schema = if group_by.is_some() {
            Schema::new(vec!["Group".to_string(), "SUM".to_string()])?
        } else {
            Schema::new((0..sum_exprs.len()).map(|i| format!("SUM_{i}")).collect())?
        };
        Ok(Self {
            child,
            group_by,
            sum_exprs,
            child_schema,
            schema,
            buffer: None,
            cursor: 0,
        })
    }

    fn materialize(&mut self) -> BlazeResult<()> {
        if self.buffer.is_some() {
            return Ok(());
        }
        let rows = match &self.group_by {
            None => {
                let mut accumulators = vec![0i64; self.sum_exprs.len()];
                while let Some(tuple) = self.child.next()? {
                    for (accumulator, expr) in accumulators.iter_mut().zip(&self.sum_exprs) {
                        *accumulator = accumulator.wrapping_add(eval_int(expr, &tuple, &self.child_schema)?);
                    }
                }
                vec![accumulators.iter().map(i64::to_string).collect()]
            }
            Some(group_expr) => {
                let sum_expr = &self.sum_exprs[0];
                let mut sums: HashMap<String, i64> = HashMap::new();
                while let Some(tuple) = self.child.next()? {
                    let key = eval_int(group_expr, &tuple, &self.child_schema)?.to_string();
                    let contribution = eval_int(sum_expr, &tuple, &self.child_schema)?;
                    let entry = sums.entry(key).or_insert(0);
                    *entry = entry.wrapping_add(contribution);
                }
                sums.into_iter().map(|(key, sum)| vec![key, sum.to_string()]).collect()
            }
        };
        self.buffer = Some(rows);
        self.cursor = 0;
        Ok(())
    }
}

impl Operator for AggregateOperator {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> BlazeResult<Option<Tuple>> {
        self.materialize()?;
        let buffer = self.buffer.as_ref().expect("materialized above");
        let tuple = buffer.get(self.cursor).cloned();
        if tuple.is_some() {
            self.cursor += 1;
        }
        Ok(tuple)
    }

    fn reset(&mut self) -> BlazeResult<()> {
        self.cursor = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::scan::{OpenReader, ScanOperator};
    use blazedb_ir::ColumnRef;
    use std::collections::HashSet;
    use std::io::{BufRead, Cursor};
    use std::path::PathBuf;

    fn scan_r() -> ScanOperator {
        let open: OpenReader = Box::new(|| Ok(Box::new(Cursor::new("A,B\n1,10\n2,20\n3,30\n")) as Box<dyn BufRead>));
        ScanOperator::headered("R", PathBuf::from("R.csv"), open).unwrap()
    }

    fn scan_t() -> ScanOperator {
        let open: OpenReader = Box::new(|| Ok(Box::new(Cursor::new("K,V\n1,5\n1,7\n2,3\n")) as Box<dyn BufRead>));
        ScanOperator::headered("T", PathBuf::from("T.csv"), open).unwrap()
    }

    #[test]
    fn ungrouped_sum_matches_scenario_six() {
        let mut aggregate = AggregateOperator::new(
            Box::new(scan_r()),
            None,
            vec![Expr::Column(ColumnRef::new("R", "B"))],
        )
        .unwrap();
        assert_eq!(aggregate.schema().names(), &["SUM_0".to_string()]);
        assert_eq!(aggregate.next().unwrap(), Some(vec!["60".to_string()]));
        assert_eq!(aggregate.next().unwrap(), None);
    }

    #[test]
    fn grouped_sum_matches_scenario_four() {
        let mut aggregate = AggregateOperator::new(
            Box::new(scan_t()),
            Some(Expr::Column(ColumnRef::new("T", "K"))),
            vec![Expr::Column(ColumnRef::new("T", "V"))],
        )
        .unwrap();
        assert_eq!(aggregate.schema().names(), &["Group".to_string(), "SUM".to_string()]);
        let mut rows = HashSet::new();
        while let Some(row) = aggregate.next().unwrap() {
            rows.insert(row);
        }
        let expected: HashSet<Tuple> = [vec!["1".to_string(), "12".to_string()], vec!["2".to_string(), "3".to_string()]]
            .into_iter()
            .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn multiple_sum_under_grouping_is_rejected() {
        let err = AggregateOperator::new(
            Box::new(scan_t()),
            Some(Expr::Column(ColumnRef::new("T", "K"))),
            vec![Expr::Column(ColumnRef::new("T", "V")), Expr::RowLiteral(1)],
        )
        .unwrap_err();
        assert!(matches!(err, BlazeError::Unsupported(_)));
    }

    #[test]
    fn row_literal_sum_counts_rows() {
        let mut aggregate = AggregateOperator::new(Box::new(scan_r()), None, vec![Expr::RowLiteral(1)]).unwrap();
        assert_eq!(aggregate.next().unwrap(), Some(vec!["3".to_string()]));
    }

    #[test]
    fn reset_replays_without_recomputing() {
        let mut aggregate = AggregateOperator::new(
            Box::new(scan_r()),
            None,
            vec![Expr::Column(ColumnRef::new("R", "B"))],
        )
        .unwrap();
        assert_eq!(aggregate.next().unwrap(), Some(vec!["60".to_string()]));
        assert_eq!(aggregate.next().unwrap(), None);
        aggregate.reset().unwrap();
        assert_eq!(aggregate.next().unwrap(), Some(vec!["60".to_string()]));
    }
}
