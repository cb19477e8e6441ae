// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # BlazeDB - Catalog Layer
//!
//! This crate resolves table names to CSV file paths and, for tables
//! described by a `schema.txt` side-channel, to a declared column list.
//!
//! ## Architecture
//!
//! There is exactly one production implementation, [`FileCatalog`], since
//! BlazeDB's only data source is a directory of CSV files (no live
//! database connections, see `SPEC_FULL.md`'s Non-goals). The [`Catalog`]
//! trait exists so the planner and tests can swap in a fixed/in-memory
//! implementation without touching the file system.

pub mod error;
pub mod schema;
pub mod r#static;
pub mod r#trait;

pub use error::{CatalogError, CatalogResult};
pub use r#static::FileCatalog;
pub use r#trait::Catalog;
pub use schema::DeclaredSchema;
