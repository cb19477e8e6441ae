// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Physical operators
//!
//! Every operator implements [`Operator`]: a pull-based iterator over
//! tuples with an associated output [`Schema`] and a `reset` that rewinds
//! it to the beginning. Operators form a tree; each non-leaf operator
//! exclusively owns its children, and only a parent resets its child.
//!
//! Streaming operators ([`scan`], [`select`], [`join`], [`project`],
//! [`distinct`]) hold O(1) memory between pulls. Blocking operators
//! ([`sort`], [`aggregate`]) materialize their entire input on the first
//! pull.

pub mod aggregate;
pub mod distinct;
pub mod join;
pub mod project;
pub mod scan;
pub mod select;
pub mod sort;

use crate::error::BlazeResult;
use crate::schema::Schema;
use crate::tuple::Tuple;

/// A node in the physical operator tree.
pub trait Operator {
    /// The schema describing every tuple this operator emits.
    fn schema(&self) -> &Schema;

    /// Produce the next tuple, or `Ok(None)` at end of stream.
    fn next(&mut self) -> BlazeResult<Option<Tuple>>;

    /// Restart this operator (and, transitively, its children) from the
    /// beginning. Blocking operators rewind only their emission cursor;
    /// already-computed results are not recomputed.
    fn reset(&mut self) -> BlazeResult<()>;
}
