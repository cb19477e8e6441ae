// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! CLI-level errors: either a bad invocation, or any [`BlazeError`] raised
//! while planning or executing the query.

use std::path::PathBuf;

use blazedb_core::BlazeError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

/// Errors `blazedb-cli` can return. Every variant maps to exit code `1`;
/// only [`CliError::Usage`] is distinguishable by its own message.
#[derive(Debug, Error)]
pub enum CliError {
    /// Wrong number of positional arguments.
    #[error("usage: blazedb <database_dir> <query_file> <output_file>")]
    Usage,

    /// The query file could not be read.
    #[error("failed to read query file {path}: {source}")]
    QueryFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any planner, evaluator, I/O, or output-writing failure from the
    /// core engine.
    #[error(transparent)]
    Blaze(#[from] BlazeError),
}
