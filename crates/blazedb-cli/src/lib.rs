// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # BlazeDB - CLI, CSV reader, and output writer
//!
//! This crate wires together the three external collaborators `spec.md`
//! §1 and §6 describe as living outside the core: a CLI entry point, a
//! CSV reader, and an output writer. It never implements query semantics
//! itself; planning and execution are entirely `blazedb-core`'s.
//!
//! [`run`] is the library entry point (`src/bin/blazedb.rs` is a thin
//! wrapper that maps its `Result` to a process exit code), matching the
//! lib/bin split the teacher repo uses for its server binary.

pub mod error;
pub mod reader;
pub mod writer;

use std::fs;
use std::rc::Rc;

use blazedb_catalog::FileCatalog;
use blazedb_core::planner::FileOpener;
use blazedb_core::Operator;

use crate::error::{CliError, CliResult};
use crate::writer::OutputWriter;

/// Run one query: `args` is `[database_dir, query_file, output_file]`,
/// matching the three positional CLI arguments from `spec.md` §6 (no
/// flags).
pub fn run(args: &[String]) -> CliResult<()> {
    let [database_dir, query_file, output_file] = args else {
        return Err(CliError::Usage);
    };

    let query_text = fs::read_to_string(query_file)
        .map_err(|source| CliError::QueryFileIo { path: query_file.as_str().into(), source })?;
    let query = blazedb_parser::parse(&query_text).map_err(blazedb_core::BlazeError::from)?;

    let catalog = FileCatalog::open(database_dir.as_str())?;
    let opener: FileOpener = Rc::new(reader::open_csv);
    let (mut root, schema) = blazedb_core::plan(&query, &catalog, opener)?;

    tracing::info!(columns = ?schema.names(), "query planned");

    let mut writer = OutputWriter::create(output_file.as_str())?;
    let mut rows = 0usize;
    while let Some(tuple) = root.next()? {
        writer.write_tuple(&tuple)?;
        rows += 1;
    }
    writer.flush()?;

    tracing::info!(rows, output = %output_file, "query complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blazedb_test_utils::Database;

    #[test]
    fn scenario_one_writes_expected_output() {
        let db = Database::standard();
        let query_path = db.write_query("SELECT R.A, R.B FROM R WHERE R.B > 15");
        let output_path = db.output_path();

        run(&[
            db.path().to_string_lossy().into_owned(),
            query_path.to_string_lossy().into_owned(),
            output_path.to_string_lossy().into_owned(),
        ])
        .unwrap();

        let contents = fs::read_to_string(&output_path).unwrap();
        assert_eq!(contents, "2, 20\n3, 30\n");
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        let err = run(&["only-one-arg".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::Usage));
    }

    #[test]
    fn unresolvable_table_is_reported_and_output_file_not_written() {
        let db = Database::empty();
        let query_path = db.write_query("SELECT R.A FROM R");
        let output_path = db.output_path();

        let err = run(&[
            db.path().to_string_lossy().into_owned(),
            query_path.to_string_lossy().into_owned(),
            output_path.to_string_lossy().into_owned(),
        ])
        .unwrap_err();

        assert!(matches!(err, CliError::Blaze(_)));
        assert!(!output_path.exists());
    }

    #[test]
    fn header_less_database_reads_via_schema_txt() {
        let db = Database::empty();
        db.write_table("R", "1,10\n2,20\n3,30\n");
        db.write_schema("R A B\n");
        let query_path = db.write_query("SELECT R.A FROM R ORDER BY R.B DESC");
        let output_path = db.output_path();

        run(&[
            db.path().to_string_lossy().into_owned(),
            query_path.to_string_lossy().into_owned(),
            output_path.to_string_lossy().into_owned(),
        ])
        .unwrap();

        let contents = fs::read_to_string(&output_path).unwrap();
        assert_eq!(contents, "3\n2\n1\n");
    }
}
