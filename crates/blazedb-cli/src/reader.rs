// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The CSV reader `spec.md` §1 treats as external to the core: opens a
//! resolved table path as a buffered byte stream. `blazedb_core::ScanOperator`
//! does the actual line-splitting and field-trimming (§4.2); this module's
//! only job is handing it a fresh `BufRead` per open/reset.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open `path` for buffered reading. Matches the `FileOpener` signature
/// `blazedb_core::planner` expects.
pub fn open_csv(path: &Path) -> std::io::Result<Box<dyn BufRead>> {
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn opens_and_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("R.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"A,B\n1,10\n").unwrap();

        let mut reader = open_csv(&path).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "A,B\n");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_csv(&dir.path().join("Ghost.csv")).is_err());
    }
}
