// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The test-time file comparator `spec.md` §1 and §8 describe: most query
//! output is order-sensitive, but grouped-aggregation output is an
//! unspecified hash order, so those comparisons are a multiset of lines
//! instead.

use std::collections::HashMap;

use blazedb_core::Tuple;

/// Render a tuple the way `blazedb-cli`'s output writer does: fields
/// joined by `", "`.
pub fn format_tuple(tuple: &Tuple) -> String {
    tuple.join(", ")
}

/// Assert two tuple streams are identical, in order. Use for every
/// operator except grouped aggregation (see
/// [`assert_rows_equal_as_multiset`]).
pub fn assert_rows_equal_ordered(actual: &[Tuple], expected: &[Tuple]) {
    assert_eq!(actual, expected, "tuple streams differ (order-sensitive comparison)");
}

/// Assert two tuple streams contain the same rows with the same
/// multiplicities, ignoring order. Use for grouped-aggregation output,
/// whose emission order is explicitly unspecified (`spec.md` §4.8, §8).
pub fn assert_rows_equal_as_multiset(actual: &[Tuple], expected: &[Tuple]) {
    let actual_counts = count_rows(actual);
    let expected_counts = count_rows(expected);
    assert_eq!(
        actual_counts, expected_counts,
        "tuple streams differ as multisets: actual {actual:?}, expected {expected:?}"
    );
}

/// Same as [`assert_rows_equal_ordered`], but comparing already-serialized
/// output lines (e.g. a file `blazedb-cli` wrote).
pub fn assert_lines_equal_ordered(actual: &str, expected: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();
    assert_eq!(actual_lines, expected_lines, "output lines differ (order-sensitive comparison)");
}

/// Same as [`assert_rows_equal_as_multiset`], but comparing serialized
/// lines.
pub fn assert_lines_equal_as_multiset(actual: &str, expected: &str) {
    let actual_counts = count_lines(actual);
    let expected_counts = count_lines(expected);
    assert_eq!(
        actual_counts, expected_counts,
        "output lines differ as a multiset: actual {actual:?}, expected {expected:?}"
    );
}

fn count_rows(rows: &[Tuple]) -> HashMap<Tuple, usize> {
    let mut counts = HashMap::new();
    for row in rows {
        *counts.entry(row.clone()).or_insert(0) += 1;
    }
    counts
}

fn count_lines(text: &str) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for line in text.lines() {
        *counts.entry(line).or_insert(0) += 1;
    }
    counts
}
