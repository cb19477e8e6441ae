// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! In-memory catalog for testing
//!
//! Mirrors `blazedb_catalog::FileCatalog`'s contract without touching the
//! file system: each table is a CSV string held in memory, optionally
//! paired with a declared column list for header-less mode. [`MockCatalog`]
//! is a [`Catalog`] on its own; call [`MockCatalog::opener`] to get the
//! `FileOpener` the planner needs to actually read each table's rows.

use std::collections::HashMap;
use std::io::{BufRead, Cursor};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use blazedb_catalog::{Catalog, CatalogError, CatalogResult};
use blazedb_core::planner::FileOpener;

struct MockTable {
    contents: String,
    declared_columns: Option<Vec<String>>,
}

/// An in-memory catalog, built up with [`MockCatalog::with_headered_table`]
/// and [`MockCatalog::with_headerless_table`].
#[derive(Default)]
pub struct MockCatalog {
    tables: HashMap<String, MockTable>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table whose CSV carries its own header line.
    pub fn with_headered_table(mut self, name: &str, csv: &str) -> Self {
        self.tables.insert(
            name.to_string(),
            MockTable { contents: csv.to_string(), declared_columns: None },
        );
        self
    }

    /// Register a header-less table; `columns` plays the role of
    /// `schema.txt`'s declared column list.
    pub fn with_headerless_table(mut self, name: &str, columns: &[&str], csv: &str) -> Self {
        self.tables.insert(
            name.to_string(),
            MockTable {
                contents: csv.to_string(),
                declared_columns: Some(columns.iter().map(|c| c.to_string()).collect()),
            },
        );
        self
    }

    /// A `FileOpener` that resolves each table's CSV path (as produced by
    /// [`Catalog::csv_path`]) back to its in-memory contents.
    pub fn opener(&self) -> FileOpener {
        let contents: HashMap<String, String> =
            self.tables.iter().map(|(name, table)| (name.clone(), table.contents.clone())).collect();
        Rc::new(move |path: &Path| {
            let key = path.to_string_lossy().into_owned();
            let data = contents.get(&key).cloned().unwrap_or_default();
            Ok(Box::new(Cursor::new(data)) as Box<dyn BufRead>)
        })
    }
}

impl Catalog for MockCatalog {
    fn csv_path(&self, table: &str) -> CatalogResult<PathBuf> {
        if self.tables.contains_key(table) {
            Ok(PathBuf::from(table))
        } else {
            Err(CatalogError::TableNotFound(table.to_string()))
        }
    }

    fn declared_columns(&self, table: &str) -> Option<&[String]> {
        self.tables.get(table).and_then(|t| t.declared_columns.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_tables() {
        let catalog = MockCatalog::new().with_headered_table("R", "A,B\n1,10\n");
        assert_eq!(catalog.csv_path("R").unwrap(), PathBuf::from("R"));
        assert!(catalog.declared_columns("R").is_none());
    }

    #[test]
    fn missing_table_is_an_error() {
        let catalog = MockCatalog::new();
        assert!(matches!(catalog.csv_path("Ghost"), Err(CatalogError::TableNotFound(_))));
    }

    #[test]
    fn headerless_table_reports_declared_columns() {
        let catalog = MockCatalog::new().with_headerless_table("R", &["A", "B"], "1,10\n");
        assert_eq!(catalog.declared_columns("R"), Some(&["A".to_string(), "B".to_string()][..]));
    }

    #[test]
    fn opener_serves_registered_contents() {
        let catalog = MockCatalog::new().with_headered_table("R", "A,B\n1,10\n");
        let opener = catalog.opener();
        let path = catalog.csv_path("R").unwrap();
        let mut reader = opener(&path).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "A,B\n");
    }
}
