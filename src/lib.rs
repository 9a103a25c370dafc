//! Roster API Library
//!
//! Membership service built around a query-rich repository layer:
//! domain entities and contracts, SQLite-backed implementations, and a
//! small HTTP surface.

pub mod api;
pub mod domain;
pub mod infrastructure;
