//! Storage adapter implementations.

mod sqlite;

pub use sqlite::SqliteStore;
