// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Project operator
//!
//! Narrows each child tuple to a requested, ordered list of columns,
//! re-numbering them from 0 in the requested order. A missing column is
//! tolerated, emitted as an empty string rather than failing the whole
//! pull, mirroring the projection contract in `SPEC_FULL.md` §4.5, which
//! is deliberately more forgiving than the evaluator's fatal `SchemaMiss`.

use crate::error::BlazeResult;
use crate::operators::Operator;
use crate::schema::Schema;
use crate::tuple::Tuple;

/// Projects a child operator's tuples down to a column subset.
pub struct ProjectOperator {
    child: Box<dyn Operator>,
    indices: Vec<Option<usize>>,
    schema: Schema,
    pass_through: bool,
}

impl ProjectOperator {
    /// `columns` are qualified names, duplicates already removed by the
    /// caller, order preserved; this becomes the output schema order.
    pub fn new(child: Box<dyn Operator>, columns: Vec<String>) -> BlazeResult<Self> {
        let indices: Vec<Option<usize>> = columns.iter().map(|name| child.schema().index_of(name)).collect();
        let pass_through = columns == child.schema().names();
        let schema = Schema::new(columns)?;
        Ok(Self { child, indices, schema, pass_through })
    }
}

impl Operator for ProjectOperator {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> BlazeResult<Option<Tuple>> {
        let Some(tuple) = self.child.next()? else {
            return Ok(None);
        };
        if self.pass_through {
            return Ok(Some(tuple));
        }
        let projected = self
            .indices
            .iter()
            .map(|index| index.map(|i| tuple[i].clone()).unwrap_or_default())
            .collect();
        Ok(Some(projected))
    }

    fn reset(&mut self) -> BlazeResult<()> {
        self.child.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::scan::{OpenReader, ScanOperator};
    use std::io::{BufRead, Cursor};
    use std::path::PathBuf;

    fn scan() -> ScanOperator {
        let open: OpenReader = Box::new(|| Ok(Box::new(Cursor::new("A,B,C\n1,10,100\n2,20,200\n")) as Box<dyn BufRead>));
        ScanOperator::headered("R", PathBuf::from("R.csv"), open).unwrap()
    }

    #[test]
    fn keeps_requested_columns_in_order() {
        let mut project = ProjectOperator::new(Box::new(scan()), vec!["R.C".into(), "R.A".into()]).unwrap();
        assert_eq!(project.schema().names(), &["R.C".to_string(), "R.A".to_string()]);
        assert_eq!(project.next().unwrap(), Some(vec!["100".to_string(), "1".to_string()]));
    }

    #[test]
    fn missing_column_becomes_empty_string() {
        let mut project = ProjectOperator::new(Box::new(scan()), vec!["R.A".into(), "R.Ghost".into()]).unwrap();
        assert_eq!(project.next().unwrap(), Some(vec!["1".to_string(), String::new()]));
    }

    #[test]
    fn full_width_projection_is_a_pass_through() {
        let mut project = ProjectOperator::new(Box::new(scan()), vec!["R.A".into(), "R.B".into(), "R.C".into()]).unwrap();
        assert_eq!(project.next().unwrap(), Some(vec!["1".to_string(), "10".to_string(), "100".to_string()]));
    }

    #[test]
    fn full_width_permutation_reorders_instead_of_passing_through() {
        let mut project = ProjectOperator::new(Box::new(scan()), vec!["R.C".into(), "R.B".into(), "R.A".into()]).unwrap();
        assert_eq!(
            project.next().unwrap(),
            Some(vec!["100".to_string(), "10".to_string(), "1".to_string()])
        );
    }

    #[test]
    fn double_projection_onto_a_subset_matches_a_single_projection() {
        let wide = ProjectOperator::new(Box::new(scan()), vec!["R.A".into(), "R.B".into()]).unwrap();
        let mut narrowed = ProjectOperator::new(Box::new(wide), vec!["R.A".into()]).unwrap();
        let mut direct = ProjectOperator::new(Box::new(scan()), vec!["R.A".into()]).unwrap();
        assert_eq!(narrowed.next().unwrap(), direct.next().unwrap());
    }
}
