// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # File-backed catalog
//!
//! [`FileCatalog`] is the only `Catalog` implementation BlazeDB ships: a
//! database is a directory containing one `<Table>.csv` per table and an
//! optional `schema.txt` (see `SPEC_FULL.md` §6). Tables named in
//! `schema.txt` are read header-less; all others are assumed to carry
//! their own header row.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, CatalogResult};
use crate::r#trait::Catalog;
use crate::schema::{DeclaredSchema, parse_schema_file};

/// Resolves tables against a directory of `<Table>.csv` files plus an
/// optional `schema.txt`.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    database_dir: PathBuf,
    declared: HashMap<String, DeclaredSchema>,
}

impl FileCatalog {
    /// Open a database directory, loading `schema.txt` if present.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if `schema.txt` exists but cannot be
    /// read, or [`CatalogError::MalformedSchema`] if it cannot be parsed.
    pub fn open(database_dir: impl Into<PathBuf>) -> CatalogResult<Self> {
        let database_dir = database_dir.into();
        let schema_path = database_dir.join("schema.txt");
        let declared = if schema_path.exists() {
            let contents = fs::read_to_string(&schema_path).map_err(|source| CatalogError::Io {
                path: schema_path.clone(),
                source,
            })?;
            parse_schema_file(&schema_path, &contents)?
        } else {
            tracing::debug!(dir = %database_dir.display(), "no schema.txt; all tables read in header mode");
            HashMap::new()
        };
        Ok(Self {
            database_dir,
            declared,
        })
    }

    fn default_csv_path(&self, table: &str) -> PathBuf {
        self.database_dir.join(format!("{table}.csv"))
    }
}

impl Catalog for FileCatalog {
    fn csv_path(&self, table: &str) -> CatalogResult<PathBuf> {
        let path = self.default_csv_path(table);
        if path.is_file() {
            Ok(path)
        } else {
            Err(CatalogError::TableNotFound(table.to_string()))
        }
    }

    fn declared_columns(&self, table: &str) -> Option<&[String]> {
        self.declared.get(table).map(|s| s.columns.as_slice())
    }
}

fn _assert_object_safe(_: &dyn Catalog) {}
