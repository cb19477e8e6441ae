// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # BlazeDB - Query Planner and Execution Engine
//!
//! This crate turns a parsed `SELECT` statement (`blazedb_ir::SelectStatement`)
//! into a tree of pull-based physical operators and runs it to completion.
//!
//! ## Architecture
//!
//! - [`eval`]: a total evaluator over the expression language in
//!   `blazedb_ir::Expr`: integer arithmetic, comparisons, and `AND`.
//! - [`operators`]: the seven physical operators (scan, select, join,
//!   project, distinct, sort, aggregate), each implementing the
//!   [`operators::Operator`] trait.
//! - [`planner`]: assembles an operator tree from a `SelectStatement` and
//!   a `blazedb_catalog::Catalog`.
//! - [`schema`] and [`tuple`]: the row and column-mapping primitives every
//!   operator shares.
//!
//! ## Example
//!
//! ```no_run
//! use blazedb_catalog::FileCatalog;
//! use blazedb_core::planner::{plan, FileOpener};
//! use blazedb_core::Operator;
//! use std::fs::File;
//! use std::io::BufReader;
//! use std::rc::Rc;
//!
//! # fn run() -> blazedb_core::error::BlazeResult<()> {
//! let query = blazedb_parser::parse("SELECT R.A FROM R WHERE R.A > 1")?;
//! let catalog = FileCatalog::open("./data")?;
//! let opener: FileOpener = Rc::new(|path| Ok(Box::new(BufReader::new(File::open(path)?)) as Box<dyn std::io::BufRead>));
//! let (mut root, _schema) = plan(&query, &catalog, opener)?;
//! while let Some(_row) = root.next()? {}
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod eval;
pub mod operators;
pub mod planner;
pub mod schema;
pub mod tuple;

pub use error::{BlazeError, BlazeResult};
pub use operators::Operator;
pub use planner::plan;
pub use schema::Schema;
pub use tuple::Tuple;
