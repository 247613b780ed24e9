//! drover-db - Database abstraction layer for Drover
//!
//! This crate provides the `Database` trait the migration engine runs
//! against, a loosely-typed [`Value`] cell for parameters and result rows,
//! and a DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod value;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
pub use value::Value;
