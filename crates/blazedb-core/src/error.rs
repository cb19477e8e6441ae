// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for the core engine
//!
//! A single [`BlazeError`] enum carries every error kind the planner,
//! operators, and evaluator can raise. `blazedb-catalog` and
//! `blazedb-parser` each keep their own narrower error type for the
//! concerns they own ([`blazedb_catalog::CatalogError`],
//! [`blazedb_parser::ParseError`]); both convert into [`BlazeError`] at the
//! boundary via `From`, the same layered-error pattern used throughout
//! this workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout `blazedb-core`.
pub type BlazeResult<T> = Result<T, BlazeError>;

/// Every error kind the core engine can raise.
#[derive(Debug, Error)]
pub enum BlazeError {
    /// File open/read/write failure. Fatal for scan initialization and
    /// output writing; per-tuple evaluator I/O glitches are instead logged
    /// and the tuple is skipped (see [`crate::operators::select`]).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed SQL, surfaced by the parser. Reported at planner entry;
    /// the query aborts before any operator is constructed.
    #[error("parse error: {0}")]
    Parse(#[from] blazedb_parser::ParseError),

    /// A table name could not be resolved through the catalog.
    #[error("catalog error: {0}")]
    Catalog(#[from] blazedb_catalog::CatalogError),

    /// An AST shape the core does not implement (reached only if a parser
    /// somehow hands the planner a node outside the evaluator's sealed
    /// domain, or the planner itself rejects an unsupported query shape,
    /// e.g. a `WHERE` predicate spanning three or more tables).
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A referenced column is absent from the current schema mapping.
    /// Fatal during expression evaluation; tolerated (empty string) during
    /// projection.
    #[error("column '{0}' not found in schema")]
    SchemaMiss(String),

    /// A non-integer operand was used in arithmetic or an inequality
    /// comparison.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// An internal invariant was violated: tuple width mismatch, a
    /// malformed CSV row, a sort key that failed to resolve, etc. These
    /// indicate a bug in the engine itself, not bad input.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
