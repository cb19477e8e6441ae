// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema mapping
//!
//! A [`Schema`] maps fully qualified column names (`Table.Column`) to
//! zero-based field indices, with insertion order significant because it
//! defines serialization order when a tuple is written out.
//!
//! Invariants, enforced at construction rather than by convention:
//! - keys are unique;
//! - values are exactly the contiguous range `[0, n)`, one each.

use std::collections::HashMap;

use crate::error::{BlazeError, BlazeResult};

/// Name-to-index mapping describing one operator's output layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from qualified column names, in tuple order.
    ///
    /// # Errors
    ///
    /// Returns [`BlazeError::InvariantViolation`] if `names` contains a
    /// duplicate.
    pub fn new(names: Vec<String>) -> BlazeResult<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(BlazeError::InvariantViolation(format!(
                    "duplicate column '{name}' in schema"
                )));
            }
        }
        Ok(Self { names, index })
    }

    /// Number of columns (tuple width this schema describes).
    pub fn width(&self) -> usize {
        self.names.len()
    }

    /// Qualified column names, in schema order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Zero-based field index for a qualified column name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Concatenate two schemas for a join: `self`'s columns keep their
    /// indices, `other`'s columns are shifted by `self.width()`.
    ///
    /// # Errors
    ///
    /// Returns [`BlazeError::InvariantViolation`] if a column name appears
    /// in both schemas.
    pub fn concat(&self, other: &Schema) -> BlazeResult<Schema> {
        let mut names = self.names.clone();
        names.extend(other.names.iter().cloned());
        Schema::new(names)
    }

    /// Build a new schema containing only `wanted` columns, re-numbered
    /// from 0 in the given order. Unknown names are silently skipped by
    /// the caller (see [`crate::operators::project`]'s tolerant contract);
    /// this constructor assumes every name is already valid.
    pub fn subset(wanted: &[String]) -> BlazeResult<Schema> {
        Schema::new(wanted.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let err = Schema::new(vec!["R.A".into(), "R.A".into()]).unwrap_err();
        assert!(matches!(err, BlazeError::InvariantViolation(_)));
    }

    #[test]
    fn indices_are_contiguous() {
        let schema = Schema::new(vec!["R.A".into(), "R.B".into(), "R.C".into()]).unwrap();
        assert_eq!(schema.width(), 3);
        assert_eq!(schema.index_of("R.A"), Some(0));
        assert_eq!(schema.index_of("R.B"), Some(1));
        assert_eq!(schema.index_of("R.C"), Some(2));
        assert_eq!(schema.index_of("R.Z"), None);
    }

    #[test]
    fn concat_shifts_right_indices() {
        let left = Schema::new(vec!["R.A".into(), "R.B".into()]).unwrap();
        let right = Schema::new(vec!["S.C".into(), "S.D".into()]).unwrap();
        let combined = left.concat(&right).unwrap();
        assert_eq!(combined.width(), 4);
        assert_eq!(combined.index_of("R.A"), Some(0));
        assert_eq!(combined.index_of("R.B"), Some(1));
        assert_eq!(combined.index_of("S.C"), Some(2));
        assert_eq!(combined.index_of("S.D"), Some(3));
    }

    #[test]
    fn concat_rejects_overlapping_names() {
        let left = Schema::new(vec!["R.A".into()]).unwrap();
        let right = Schema::new(vec!["R.A".into()]).unwrap();
        assert!(left.concat(&right).is_err());
    }
}
