// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Sort operator
//!
//! Blocking multi-key sort. On the first pull, the entire child is
//! drained into a buffer and every sort-key expression is evaluated for
//! every tuple up front, so a malformed key fails the whole sort rather
//! than silently reordering around it. Keys are compared in list order,
//! later keys break ties left by earlier ones, with a final stable
//! preserve of input order for tuples tied on every key. `ASC` is the
//! default direction; `DESC` reverses that key's comparator only.

use std::cmp::Ordering;

use blazedb_ir::{Expr, SortDirection};

use crate::error::BlazeResult;
use crate::eval::eval_int;
use crate::operators::Operator;
use crate::schema::Schema;
use crate::tuple::Tuple;

/// Buffers and sorts a child's output by a list of integer-valued keys.
pub struct SortOperator {
    child: Box<dyn Operator>,
    keys: Vec<(Expr, SortDirection)>,
    schema: Schema,
    buffer: Option<Vec<Tuple>>,
    cursor: usize,
}

impl SortOperator {
    pub fn new(child: Box<dyn Operator>, keys: Vec<(Expr, SortDirection)>) -> Self {
        let schema = child.schema().clone();
        Self { child, keys, schema, buffer: None, cursor: 0 }
    }

    fn materialize(&mut self) -> BlazeResult<()> {
        if self.buffer.is_some() {
            return Ok(());
        }
        let mut keyed: Vec<(Vec<i64>, Tuple)> = Vec::new();
        while let Some(tuple) = self.child.next()? {
            let mut key_values = Vec::with_capacity(self.keys.len());
            for (expr, _) in &self.keys {
                key_values.push(eval_int(expr, &tuple, &self.schema)?);
            }
            keyed.push((key_values, tuple));
        }
        keyed.sort_by(|a, b| {
            for (i, (_, direction)) in self.keys.iter().enumerate() {
                let cmp = a.0[i].cmp(&b.0[i]);
                let cmp = if *direction == SortDirection::Desc { cmp.reverse() } else { cmp };
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        });
        self.buffer = Some(keyed.into_iter().map(|(_, tuple)| tuple).collect());
        self.cursor = 0;
        Ok(())
    }
}

impl Operator for SortOperator {
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
        self.buffer = None;
        self.cursor = 0;
        self.child.reset()
    }
}
