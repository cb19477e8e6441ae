// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Scan operator
//!
//! Streams tuples from a CSV-backed relation, one line per tuple, fields
//! split on `,` with whitespace trimmed per field. The scan never opens a
//! file itself; the planner hands it a path plus a small `open` factory
//! (ultimately backed by `blazedb_cli::reader`), so this crate has no
//! direct dependency on any particular I/O layer.
//!
//! Two modes, selected by whether the catalog declares columns for this
//! table (see `blazedb_catalog::Catalog::declared_columns`):
//! - **Header mode** (no declared columns): the first line of the file is
//!   a header naming each column; it is consumed once and never re-emitted
//!   as a tuple.
//! - **Header-less mode** (declared columns present): every line is data;
//!   column names come from the catalog instead.

use std::io::BufRead;
use std::path::PathBuf;

use crate::error::{BlazeError, BlazeResult};
use crate::operators::Operator;
use crate::schema::Schema;
use crate::tuple::Tuple;

/// Opens a fresh reader over the scan's backing file. Boxed so the
/// planner can inject any `BufRead` source (a real file, or a fixture
/// string in tests) without this crate depending on `std::fs` directly.
pub type OpenReader = Box<dyn Fn() -> std::io::Result<Box<dyn BufRead>>>;

/// Streams tuples from one CSV-backed table.
pub struct ScanOperator {
    table: String,
    path: PathBuf,
    open: OpenReader,
    reader: Option<Box<dyn BufRead>>,
    schema: Schema,
    header_mode: bool,
}

impl ScanOperator {
    /// Construct a scan in header mode: the schema is read from the
    /// file's first line.
    pub fn headered(table: impl Into<String>, path: PathBuf, open: OpenReader) -> BlazeResult<Self> {
        let table = table.into();
        let mut reader = open_io(&open, &path)?;
        let header = read_line(&mut reader, &path)?.ok_or_else(|| {
            BlazeError::InvariantViolation(format!("table '{table}' at {} has no header line", path.display()))
        })?;
        let names = split_fields(&header).into_iter().map(|col| format!("{table}.{col}")).collect();
        let schema = Schema::new(names)?;
        Ok(Self {
            table,
            path,
            open,
            reader: Some(reader),
            schema,
            header_mode: true,
        })
    }

    /// Construct a scan in header-less mode: column names are supplied by
    /// the catalog, every line is data.
    pub fn headerless(table: impl Into<String>, path: PathBuf, columns: &[String], open: OpenReader) -> BlazeResult<Self> {
        let table = table.into();
        let reader = open_io(&open, &path)?;
        let names = columns.iter().map(|col| format!("{table}.{col}")).collect();
        let schema = Schema::new(names)?;
        Ok(Self {
            table,
            path,
            open,
            reader: Some(reader),
            schema,
            header_mode: false,
        })
    }
}

impl Operator for ScanOperator {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next(&mut self) -> BlazeResult<Option<Tuple>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let Some(line) = read_line(reader, &self.path)? else {
            self.reader = None;
            return Ok(None);
        };
        let fields = split_fields(&line);
        if fields.len() != self.schema.width() {
            return Err(BlazeError::InvariantViolation(format!(
                "table '{}' row has {} field(s), expected {} per schema",
                self.table,
                fields.len(),
                self.schema.width()
            )));
        }
        Ok(Some(fields))
    }

    fn reset(&mut self) -> BlazeResult<()> {
        let mut reader = open_io(&self.open, &self.path)?;
        if self.header_mode {
            read_line(&mut reader, &self.path)?;
        }
        self.reader = Some(reader);
        Ok(())
    }
}

fn open_io(open: &OpenReader, path: &PathBuf) -> BlazeResult<Box<dyn BufRead>> {
    open().map_err(|source| BlazeError::Io { path: path.clone(), source })
}

fn read_line(reader: &mut Box<dyn BufRead>, path: &PathBuf) -> BlazeResult<Option<String>> {
    let mut buf = String::new();
    let bytes = reader.read_line(&mut buf).map_err(|source| BlazeError::Io { path: path.clone(), source })?;
    if bytes == 0 {
        return Ok(None);
    }
    while buf.ends_with('\n') || buf.ends_with('\r') {
        buf.pop();
    }
    Ok(Some(buf))
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn opener(contents: &'static str) -> OpenReader {
        Box::new(move || Ok(Box::new(Cursor::new(contents)) as Box<dyn BufRead>))
    }

    #[test]
    fn headered_scan_consumes_header_and_qualifies_columns() {
        let mut scan = ScanOperator::headered("R", PathBuf::from("R.csv"), opener("A,B\n1,10\n2,20\n")).unwrap();
        assert_eq!(scan.schema().names(), &["R.A".to_string(), "R.B".to_string()]);
        assert_eq!(scan.next().unwrap(), Some(vec!["1".to_string(), "10".to_string()]));
        assert_eq!(scan.next().unwrap(), Some(vec!["2".to_string(), "20".to_string()]));
        assert_eq!(scan.next().unwrap(), None);
    }

    #[test]
    fn headerless_scan_never_skips_a_line() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let mut scan = ScanOperator::headerless("R", PathBuf::from("R.csv"), &columns, opener("1,10\n2,20\n")).unwrap();
        assert_eq!(scan.next().unwrap(), Some(vec!["1".to_string(), "10".to_string()]));
        assert_eq!(scan.next().unwrap(), Some(vec!["2".to_string(), "20".to_string()]));
        assert_eq!(scan.next().unwrap(), None);
    }

    #[test]
    fn reset_rewinds_to_the_first_data_row() {
        let mut scan = ScanOperator::headered("R", PathBuf::from("R.csv"), opener("A,B\n1,10\n2,20\n")).unwrap();
        scan.next().unwrap();
        scan.next().unwrap();
        assert_eq!(scan.next().unwrap(), None);
        scan.reset().unwrap();
        assert_eq!(scan.next().unwrap(), Some(vec!["1".to_string(), "10".to_string()]));
    }

    #[test]
    fn trims_whitespace_around_fields() {
        let mut scan = ScanOperator::headered("R", PathBuf::from("R.csv"), opener("A,B\n 1 , 10 \n")).unwrap();
        assert_eq!(scan.next().unwrap(), Some(vec!["1".to_string(), "10".to_string()]));
    }

    #[test]
    fn field_count_mismatch_is_an_invariant_violation() {
        let mut scan = ScanOperator::headered("R", PathBuf::from("R.csv"), opener("A,B\n1,10,999\n")).unwrap();
        assert!(matches!(scan.next(), Err(BlazeError::InvariantViolation(_))));
    }
}
