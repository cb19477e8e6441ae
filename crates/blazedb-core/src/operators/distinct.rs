// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Duplicate-elimination operator
//!
//! Hash-based `DISTINCT`: a tuple is admitted only the first time its
//! identity, the concatenation of its fields with `", "` as separator,
//! is observed. Emits in child order, so it preserves the first
//! occurrence of each distinct tuple.

use std::collections::HashSet;

use crate::error::BlazeResult;
use crate::operators::Operator;
use crate::schema::Schema;
use crate::tuple::Tuple;

/// Drops tuples whose field-value identity has already been emitted.
pub struct DuplicateEliminationOperator {
    child: Box<dyn Operator>,
    seen: HashSet<String>,
}

impl DuplicateEliminationOperator {
    pub fn new(child: Box<dyn Operator>) -> Self {
        Self { child, seen: HashSet::new() }
    }
}

fn tuple_key(tuple: &Tuple) -> String {
    tuple.join(", ")
}

impl Operator for DuplicateEliminationOperator {
    fn schema(&self) -> &Schema {
        self.child.schema()
    }

    fn next(&mut self) -> BlazeResult<Option<Tuple>> {
        loop {
            let Some(tuple) = self.child.next()? else {
                return Ok(None);
            };
            if self.seen.insert(tuple_key(&tuple)) {
                return Ok(Some(tuple));
            }
        }
    }

    fn reset(&mut self) -> BlazeResult<()> {
        self.seen.clear();
        self.child.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::scan::{OpenReader, ScanOperator};
    use std::io::{BufRead, Cursor};
    use std::path::PathBuf;

    fn scan_with_duplicates() -> ScanOperator {
        let open: OpenReader = Box::new(|| Ok(Box::new(Cursor::new("K\n1\n1\n2\n1\n")) as Box<dyn BufRead>));
        ScanOperator::headered("T", PathBuf::from("T.csv"), open).unwrap()
    }

    #[test]
    fn keeps_first_occurrence_only() {
        let mut distinct = DuplicateEliminationOperator::new(Box::new(scan_with_duplicates()));
        assert_eq!(distinct.next().unwrap(), Some(vec!["1".to_string()]));
        assert_eq!(distinct.next().unwrap(), Some(vec!["2".to_string()]));
        assert_eq!(distinct.next().unwrap(), None);
    }

    #[test]
    fn is_idempotent() {
        let inner = DuplicateEliminationOperator::new(Box::new(scan_with_duplicates()));
        let mut outer = DuplicateEliminationOperator::new(Box::new(inner));
        assert_eq!(outer.next().unwrap(), Some(vec!["1".to_string()]));
        assert_eq!(outer.next().unwrap(), Some(vec!["2".to_string()]));
        assert_eq!(outer.next().unwrap(), None);
    }

    #[test]
    fn reset_clears_seen_set() {
        let mut distinct = DuplicateEliminationOperator::new(Box::new(scan_with_duplicates()));
        distinct.next().unwrap();
        distinct.reset().unwrap();
        assert_eq!(distinct.next().unwrap(), Some(vec!["1".to_string()]));
    }
}
