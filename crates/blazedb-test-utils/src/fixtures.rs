// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Fixture tables matching `spec.md` §8's end-to-end scenarios:
//!
//! - `R(A,B)` = `{(1,10),(2,20),(3,30)}`
//! - `S(C,D)` = `{(1,100),(2,200),(4,400)}`
//! - `T(K,NAME,V)` = `{(1,'x',5),(1,'x',7),(2,'y',3)}`
//!
//! [`standard_catalog`] builds these as an in-memory [`MockCatalog`] for
//! operator/planner tests; [`Database`] writes them to a temporary
//! directory (optionally with a `schema.txt`) for `blazedb-cli`
//! integration tests that drive the real `FileCatalog` and CSV reader.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::mock_catalog::MockCatalog;

pub const R_CSV: &str = "A,B\n1,10\n2,20\n3,30\n";
pub const S_CSV: &str = "C,D\n1,100\n2,200\n4,400\n";
pub const T_CSV: &str = "K,NAME,V\n1,x,5\n1,x,7\n2,y,3\n";

/// An in-memory catalog preloaded with `R`, `S`, and `T`, all in header
/// mode.
pub fn standard_catalog() -> MockCatalog {
    MockCatalog::new()
        .with_headered_table("R", R_CSV)
        .with_headered_table("S", S_CSV)
        .with_headered_table("T", T_CSV)
}

/// A temporary on-disk database directory, for tests that exercise
/// `blazedb-cli` end to end (real files, real `FileCatalog`).
pub struct Database {
    dir: TempDir,
}

impl Database {
    /// An empty database directory with no `schema.txt`; every table
    /// added is read in header mode.
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().expect("failed to create temp database directory") }
    }

    /// `R`, `S`, and `T` as described in `spec.md` §8, all header mode.
    pub fn standard() -> Self {
        let db = Self::empty();
        db.write_table("R", R_CSV);
        db.write_table("S", S_CSV);
        db.write_table("T", T_CSV);
        db
    }

    /// Write `<name>.csv` under the database directory.
    pub fn write_table(&self, name: &str, csv: &str) {
        fs::write(self.dir.path().join(format!("{name}.csv")), csv).expect("failed to write fixture CSV");
    }

    /// Write `schema.txt`, switching every table it lists to header-less
    /// scan mode.
    pub fn write_schema(&self, schema_txt: &str) {
        fs::write(self.dir.path().join("schema.txt"), schema_txt).expect("failed to write schema.txt");
    }

    /// Write a query to `<dir>/query.sql` and return its path, for tests
    /// that invoke `blazedb_cli::run` with a query file argument.
    pub fn write_query(&self, sql: &str) -> PathBuf {
        let path = self.dir.path().join("query.sql");
        fs::write(&path, sql).expect("failed to write query file");
        path
    }

    /// The path an output file would live at, without creating it.
    /// `blazedb_cli::run` is responsible for creating it.
    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("output.txt")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blazedb_catalog::Catalog;

    #[test]
    fn standard_catalog_resolves_all_three_tables() {
        let catalog = standard_catalog();
        assert!(catalog.csv_path("R").is_ok());
        assert!(catalog.csv_path("S").is_ok());
        assert!(catalog.csv_path("T").is_ok());
    }

    #[test]
    fn standard_database_writes_csv_files_to_disk() {
        let db = Database::standard();
        assert!(db.path().join("R.csv").is_file());
        assert!(db.path().join("S.csv").is_file());
        assert!(db.path().join("T.csv").is_file());
        assert!(!db.path().join("schema.txt").exists());
    }

    #[test]
    fn write_schema_adds_schema_txt() {
        let db = Database::empty();
        db.write_table("R", "1,10\n2,20\n");
        db.write_schema("R A B\n");
        assert!(db.path().join("schema.txt").is_file());
    }
}
