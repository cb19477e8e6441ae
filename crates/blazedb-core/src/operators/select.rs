// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Select operator
//!
//! Drops tuples that fail a predicate. Evaluator failures on a single
//! tuple (e.g. a malformed CSV field) are logged and that tuple is treated
//! as non-matching rather than aborting the whole query, the one place
//! in the pipeline where a per-row error is tolerated instead of fatal
//! (see `SPEC_FULL.md` §7).

use blazedb_ir::Expr;

use crate::error::BlazeResult;
use crate::eval::eval_bool;
use crate::operators::Operator;
use crate::schema::Schema;
use crate::tuple::Tuple;

/// Filters a child operator's output by a predicate, preserving schema and
/// order.
pub struct SelectOperator {
    child: Box<dyn Operator>,
    predicate: Expr,
}

impl SelectOperator {
    pub fn new(child: Box<dyn Operator>, predicate: Expr) -> Self {
        Self { child, predicate }
    }
}

impl Operator for SelectOperator {
    fn schema(&self) -> &Schema {
        self.child.schema()
    }

    fn next(&mut self) -> BlazeResult<Option<Tuple>> {
        loop {
            let Some(tuple) = self.child.next()? else {
                return Ok(None);
            };
            match eval_bool(&self.predicate, &tuple, self.child.schema()) {
                Ok(true) => return Ok(Some(tuple)),
                Ok(false) => continue,
                Err(err) => {
                    tracing::warn!(%err, "predicate evaluation failed for a tuple; skipping it");
                    continue;
                }
            }
        }
    }

    fn reset(&mut self) -> BlazeResult<()> {
        self.child.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::scan::{OpenReader, ScanOperator};
    use blazedb_ir::{BinaryOp, ColumnRef};
    use std::io::{BufRead, Cursor};
    use std::path::PathBuf;

    fn scan() -> ScanOperator {
        let open: OpenReader = Box::new(|| Ok(Box::new(Cursor::new("A,B\n1,10\n2,20\n3,30\n")) as Box<dyn BufRead>));
        ScanOperator::headered("R", PathBuf::from("R.csv"), open).unwrap()
    }

    fn gt_15() -> Expr {
        Expr::BinaryOp {
            left: Box::new(Expr::Column(ColumnRef::new("R", "B"))),
            op: BinaryOp::Gt,
            right: Box::new(Expr::Literal(15)),
        }
    }

    #[test]
    fn drops_non_matching_tuples() {
        let mut select = SelectOperator::new(Box::new(scan()), gt_15());
        assert_eq!(select.next().unwrap(), Some(vec!["2".to_string(), "20".to_string()]));
        assert_eq!(select.next().unwrap(), Some(vec!["3".to_string(), "30".to_string()]));
        assert_eq!(select.next().unwrap(), None);
    }

    #[test]
    fn reset_delegates_to_child() {
        let mut select = SelectOperator::new(Box::new(scan()), gt_15());
        select.next().unwrap();
        select.reset().unwrap();
        assert_eq!(select.next().unwrap(), Some(vec!["2".to_string(), "20".to_string()]));
    }

    #[test]
    fn composing_two_selects_matches_a_single_conjunction() {
        let first = SelectOperator::new(Box::new(scan()), gt_15());
        let le_25 = Expr::BinaryOp {
            left: Box::new(Expr::Column(ColumnRef::new("R", "B"))),
            op: BinaryOp::LtEq,
            right: Box::new(Expr::Literal(25)),
        };
        let mut stacked = SelectOperator::new(Box::new(first), le_25);
        assert_eq!(stacked.next().unwrap(), Some(vec!["2".to_string(), "20".to_string()]));
        assert_eq!(stacked.next().unwrap(), None);
    }
}
