// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Join operator
//!
//! Tuple-nested-loop inner join. For each outer tuple, the inner child is
//! reset and scanned to completion; every inner tuple that satisfies the
//! (optional) join predicate is merged with the outer tuple and buffered.
//! Buffered matches for the current outer tuple are drained before the
//! next outer tuple is pulled, so emission order is lexicographic in
//! `(outer-order, inner-order)`.

use std::collections::VecDeque;

use blazedb_ir::Expr;

use crate::error::BlazeResult;
use crate::eval::eval_bool;
use crate::operators::Operator;
use crate::schema::Schema;
use crate::tuple::{self, Tuple};

/// Inner join over two child operators, combined by an optional predicate.
pub struct JoinOperator {
    outer: Box<dyn Operator>,
    inner: Box<dyn Operator>,
    predicate: Option<Expr>,
    schema: Schema,
    current_outer: Option<Tuple>,
    buffer: VecDeque<Tuple>,
}

impl JoinOperator {
    pub fn new(outer: Box<dyn Operator>, inner: Box<dyn Operator>, predicate: Option<Expr>) -> BlazeResult<Self> {
        let schema = outer.schema().concat(inner.schema())?;
        Ok(Self {
            outer,
            inner,
            predicate,
            schema,
            current_outer: None,
            buffer: VecDeque::new(),
        })
    }

    /// Scan the inner child fully for the current outer tuple, filling
    /// `buffer` with every merged tuple that satisfies the predicate.
    fn fill_buffer_for_outer(&mut self) -> BlazeResult<()> {
        self.inner.reset()?;
        let outer = self.current_outer.as_ref().expect("fill_buffer_for_outer requires a current outer tuple");
        while let Some(inner_tuple) = self.inner.next()? {
            let merged = tuple::concat(outer, &inner_tuple);
            let admit = match &self.predicate {
                None => true,
                Some(predicate) => match eval_bool(predicate, &merged, &self.schema) {
                    Ok(matched) => matched,
                    Err(err) => {
                        tracing::warn!(%err, "join predicate evaluation failed for a tuple pair; skipping it");
                        false
                    }
                },
            };
            if admit {
                self.buffer.push_back(merged);
            }
        }
        Ok(())
    }
}

impl Operator for JoinOperator {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> BlazeResult<Option<Tuple>> {
        loop {
            if let Some(tuple) = self.buffer.pop_front() {
                return Ok(Some(tuple));
            }
            let Some(outer_tuple) = self.outer.next()? else {
                return Ok(None);
            };
            self.current_outer = Some(outer_tuple);
            self.fill_buffer_for_outer()?;
        }
    }

    fn reset(&mut self) -> BlazeResult<()> {
        self.outer.reset()?;
        self.inner.reset()?;
        self.current_outer = None;
        self.buffer.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::scan::{OpenReader, ScanOperator};
    use blazedb_ir::{BinaryOp, ColumnRef};
    use std::io::{BufRead, Cursor};
    use std::path::PathBuf;

    fn scan(table: &'static str, contents: &'static str) -> ScanOperator {
        let open: OpenReader = Box::new(move || Ok(Box::new(Cursor::new(contents)) as Box<dyn BufRead>));
        ScanOperator::headered(table, PathBuf::from(format!("{table}.csv")), open).unwrap()
    }

    fn r_s_join() -> JoinOperator {
        let r = scan("R", "A,B\n1,10\n2,20\n3,30\n");
        let s = scan("S", "C,D\n1,100\n2,200\n4,400\n");
        let predicate = Expr::BinaryOp {
            left: Box::new(Expr::Column(ColumnRef::new("R", "A"))),
            op: BinaryOp::Eq,
            right: Box::new(Expr::Column(ColumnRef::new("S", "C"))),
        };
        JoinOperator::new(Box::new(r), Box::new(s), Some(predicate)).unwrap()
    }

    #[test]
    fn emits_outer_major_inner_minor_order() {
        let mut join = r_s_join();
        assert_eq!(
            join.next().unwrap(),
            Some(vec!["1".to_string(), "10".to_string(), "1".to_string(), "100".to_string()])
        );
        assert_eq!(
            join.next().unwrap(),
            Some(vec!["2".to_string(), "20".to_string(), "2".to_string(), "200".to_string()])
        );
        assert_eq!(join.next().unwrap(), None);
    }

    #[test]
    fn schema_is_outer_then_inner_concatenated() {
        let join = r_s_join();
        assert_eq!(join.schema().names(), &["R.A".to_string(), "R.B".to_string(), "S.C".to_string(), "S.D".to_string()]);
    }

    #[test]
    fn no_predicate_is_a_cross_product() {
        let r = scan("R", "A,B\n1,10\n2,20\n");
        let s = scan("S", "C,D\n1,100\n");
        let mut join = JoinOperator::new(Box::new(r), Box::new(s), None).unwrap();
        let mut count = 0;
        while join.next().unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn reset_clears_buffer_and_replays_identically() {
        let mut join = r_s_join();
        let first_pass: Vec<Tuple> = std::iter::from_fn(|| join.next().transpose()).map(|r| r.unwrap()).collect();
        join.reset().unwrap();
        let second_pass: Vec<Tuple> = std::iter::from_fn(|| join.next().transpose()).map(|r| r.unwrap()).collect();
        assert_eq!(first_pass, second_pass);
    }
}
