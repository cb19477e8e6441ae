// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog trait for table resolution
//!
//! This module defines the synchronous `Catalog` trait the planner uses to
//! turn a table name into a CSV path and, for header-less tables, a
//! declared column list. BlazeDB's pull-driven, single-threaded execution
//! model (see `SPEC_FULL.md` §5) has no use for an async interface; every
//! resolution is a local file-system lookup.

use crate::error::CatalogResult;
use std::path::PathBuf;

/// Resolves table names to CSV file paths and header-less schemas.
///
/// # Examples
///
/// ```
/// use blazedb_catalog::{Catalog, CatalogResult};
/// use std::path::PathBuf;
///
/// struct FixedCatalog;
///
/// impl Catalog for FixedCatalog {
///     fn csv_path(&self, table: &str) -> CatalogResult<PathBuf> {
///         Ok(PathBuf::from(format!("{table}.csv")))
///     }
///
///     fn declared_columns(&self, _table: &str) -> Option<&[String]> {
///         None
///     }
/// }
///
/// let catalog = FixedCatalog;
/// assert_eq!(catalog.csv_path("R").unwrap(), PathBuf::from("R.csv"));
/// ```
pub trait Catalog {
    /// Resolve a table name to the CSV file backing it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::TableNotFound`] if no CSV file
    /// backs this table name.
    fn csv_path(&self, table: &str) -> CatalogResult<PathBuf>;

    /// Declared column names for a header-less table, in tuple-index
    /// order. `None` means the table's CSV carries its own header line
    /// (the scan operator should read it instead).
    fn declared_columns(&self, table: &str) -> Option<&[String]>;
}
