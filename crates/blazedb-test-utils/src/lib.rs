// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for BlazeDB
//!
//! This crate provides the two test-time collaborators `spec.md` §1 treats
//! as external to the core: fixture tables matching the §8 end-to-end
//! scenarios, and an order-insensitive-for-grouped-aggregation line
//! comparator. It also ships a [`MockCatalog`] so operator- and
//! planner-level tests don't have to touch the file system.
//!
//! - [`fixtures`]: in-memory (`MockCatalog`) and on-disk (`Database`)
//!   renditions of the `R`, `S`, `T` tables from `spec.md` §8.
//! - [`mock_catalog`]: an in-memory [`blazedb_catalog::Catalog`]
//!   implementation backed by a `HashMap`, paired with a `FileOpener` that
//!   serves each table's CSV text from memory.
//! - [`assertions`]: the order-sensitive and multiset line comparators
//!   `spec.md` §8 specifies.

pub mod assertions;
pub mod fixtures;
pub mod mock_catalog;

pub use fixtures::Database;
pub use mock_catalog::MockCatalog;
