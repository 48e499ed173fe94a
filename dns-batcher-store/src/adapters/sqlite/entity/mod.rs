//! `SeaORM` entity models for the SQLite store.

pub(crate) mod batch_change;
pub(crate) mod record_set;
pub(crate) mod single_change;
pub(crate) mod zone;
