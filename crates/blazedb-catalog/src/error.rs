// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! This module defines the error types used throughout the catalog layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while resolving tables through a [`crate::Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Requested table has no CSV file under the database directory.
    #[error("table '{0}' not found in database directory")]
    TableNotFound(String),

    /// The schema description file exists but could not be parsed.
    #[error("malformed schema file {path}: {reason}")]
    MalformedSchema { path: PathBuf, reason: String },

    /// Failed to read the database directory or schema file.
    #[error("catalog I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
