// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # BlazeDB - Intermediate Representation
//!
//! This crate provides the intermediate representation (IR) for the
//! subset of `SELECT` BlazeDB supports. It is produced by `blazedb-parser`
//! and consumed by `blazedb-core`'s planner and evaluator. The IR is
//! intentionally narrow, see [`expr::Expr`] for why it is a sealed sum
//! type rather than a general SQL AST.

pub mod expr;
pub mod query;

pub use expr::{BinaryOp, ColumnRef, Expr};
pub use query::{Join, OrderBy, SelectItem, SelectStatement, SortDirection, TableRef};
