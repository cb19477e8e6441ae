// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema description file
//!
//! Parses the `schema.txt` side-channel file described in the external
//! interfaces: one table per line, `TableName col1 col2 … colN`
//! (whitespace-separated). A table listed here is read in header-less mode
//! by the scan operator; its column names come from this file, not from
//! the first line of the CSV.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};

/// Column names for one table, in declared (and thus tuple-index) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredSchema {
    pub table: String,
    pub columns: Vec<String>,
}

/// Parse a `schema.txt` file's contents into one [`DeclaredSchema`] per
/// line. Blank lines are skipped; each non-blank line must have at least a
/// table name and one column.
pub fn parse_schema_file(path: &Path, contents: &str) -> CatalogResult<HashMap<String, DeclaredSchema>> {
    let mut schemas = HashMap::new();
    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let table = parts.next().ok_or_else(|| CatalogError::MalformedSchema {
            path: path.to_path_buf(),
            reason: format!("line {}: missing table name", line_no + 1),
        })?;
        let columns: Vec<String> = parts.map(str::to_string).collect();
        if columns.is_empty() {
            return Err(CatalogError::MalformedSchema {
                path: path.to_path_buf(),
                reason: format!("line {}: table '{table}' has no columns", line_no + 1),
            });
        }
        schemas.insert(
            table.to_string(),
            DeclaredSchema {
                table: table.to_string(),
                columns,
            },
        );
    }
    Ok(schemas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_multiple_tables() {
        let contents = "R A B\nS C D\n";
        let schemas = parse_schema_file(&PathBuf::from("schema.txt"), contents).unwrap();
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas["R"].columns, vec!["A", "B"]);
        assert_eq!(schemas["S"].columns, vec!["C", "D"]);
    }

    #[test]
    fn skips_blank_lines() {
        let contents = "R A B\n\n\nS C D\n";
        let schemas = parse_schema_file(&PathBuf::from("schema.txt"), contents).unwrap();
        assert_eq!(schemas.len(), 2);
    }

    #[test]
    fn rejects_table_with_no_columns() {
        let contents = "R\n";
        let err = parse_schema_file(&PathBuf::from("schema.txt"), contents).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedSchema { .. }));
    }
}
