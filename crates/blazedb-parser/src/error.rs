// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for the parser.
//!
//! Unlike the teacher crate this parser is descended from, there is no
//! partial/recoverable lowering mode: §7 of `SPEC_FULL.md` is explicit
//! that a `ParseError` aborts the query, so every failure here is fatal by
//! construction.

/// Result type alias for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors produced while tokenizing or parsing a query.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The tokenizer found a character it doesn't recognize.
    #[error("unexpected character '{found}' at byte offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    /// The parser expected a specific token but found something else (or
    /// end of input).
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// A SQL construct outside the supported subset (see `SPEC_FULL.md`
    /// Non-goals): subqueries, `OR`, outer joins, non-integer literals,
    /// unsupported functions, etc.
    #[error("unsupported syntax: {0}")]
    Unsupported(String),

    /// The query ended before a required clause was parsed.
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_human_readable() {
        let err = ParseError::UnexpectedToken {
            expected: "FROM".to_string(),
            found: "WHERE".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("FROM"));
        assert!(msg.contains("WHERE"));
    }
}
