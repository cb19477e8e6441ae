// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # BlazeDB - Parser
//!
//! Turns query text into the [`blazedb_ir::SelectStatement`] the rest of
//! the engine operates on.
//!
//! ```
//! let stmt = blazedb_parser::parse("SELECT R.A FROM R WHERE R.A > 1").unwrap();
//! assert_eq!(stmt.from.name, "R");
//! ```
//!
//! There is no recoverable/partial parse mode here (see [`error::ParseError`]):
//! a query either fully matches the supported subset or the parse fails and
//! the query is rejected before planning begins.

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::{ParseError, ParseResult};
pub use lexer::{Token, tokenize};
pub use parser::parse_select;

use blazedb_ir::SelectStatement;

/// Parse a single `SELECT` query.
pub fn parse(input: &str) -> ParseResult<SelectStatement> {
    parse_select(input)
}
