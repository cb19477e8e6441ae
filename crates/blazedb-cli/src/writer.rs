// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The output writer `spec.md` §1 treats as external to the core:
//! serializes tuples to a file, one per line, fields joined by `", "`
//! (§6). No header is written; a trailing newline follows the last tuple.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use blazedb_core::error::{BlazeError, BlazeResult};
use blazedb_core::Tuple;

/// Writes query output to a file, one tuple per line.
pub struct OutputWriter {
    path: PathBuf,
    inner: BufWriter<File>,
}

impl OutputWriter {
    /// Create (or truncate) `path` for writing.
    pub fn create(path: impl Into<PathBuf>) -> BlazeResult<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| BlazeError::Io { path: path.clone(), source })?;
        Ok(Self { path, inner: BufWriter::new(file) })
    }

    /// Write one tuple as `field1, field2, ...\n`.
    pub fn write_tuple(&mut self, tuple: &Tuple) -> BlazeResult<()> {
        writeln!(self.inner, "{}", tuple.join(", ")).map_err(|source| BlazeError::Io { path: self.path.clone(), source })
    }

    /// Flush buffered output to disk. Errors encountered here are fatal,
    /// per `spec.md` §7's `IoError` propagation for output writing.
    pub fn flush(&mut self) -> BlazeResult<()> {
        self.inner.flush().map_err(|source| BlazeError::Io { path: self.path.clone(), source })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_tuples_comma_space_joined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut writer = OutputWriter::create(&path).unwrap();
        writer.write_tuple(&vec!["1".to_string(), "10".to_string()]).unwrap();
        writer.write_tuple(&vec!["2".to_string(), "20".to_string()]).unwrap();
        writer.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1, 10\n2, 20\n");
    }

    #[test]
    fn create_truncates_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale contents\n").unwrap();
        let mut writer = OutputWriter::create(&path).unwrap();
        writer.write_tuple(&vec!["1".to_string()]).unwrap();
        writer.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n");
    }
}
