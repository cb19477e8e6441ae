// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Tuple
//!
//! A tuple is an ordered row of field values. Fields are stored as strings
//! and parsed as signed 64-bit integers on demand by the evaluator. There
//! is no eager typed column store, matching the source system's
//! "everything is text until an operator needs a number" model.

/// An immutable row of field values, in schema order.
pub type Tuple = Vec<String>;

/// Concatenate two tuples, preserving order: `left` fields first, then
/// `right`. Used by the join operator to build a merged row.
pub fn concat(left: &[String], right: &[String]) -> Tuple {
    let mut out = Vec::with_capacity(left.len() + right.len());
    out.extend_from_slice(left);
    out.extend_from_slice(right);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_preserves_order() {
        let left = vec!["1".to_string(), "10".to_string()];
        let right = vec!["100".to_string()];
        assert_eq!(concat(&left, &right), vec!["1", "10", "100"]);
    }
}
