//! # donorbook-store
//!
//! SQLite storage for donors, payments and persisted admins.
//!
//! [`Database`] wraps a single `rusqlite::Connection` and provides typed CRUD
//! helpers. Inserts and deletes report whether a row actually changed as a
//! plain `bool`, so duplicates and misses never surface as errors. [`Pool`]
//! runs those helpers for async callers on a bounded set of connections.

pub mod admins;
pub mod database;
pub mod donors;
pub mod migrations;
pub mod models;
pub mod payments;
pub mod pool;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;
pub use pool::{DatabaseManager, Pool};
