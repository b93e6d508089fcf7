//! Relational stores the loader writes through.
//!
//! - [`Store`] — transaction-scoped insert, bulk copy, commit, rollback
//! - [`Memory`] / [`MemoryTxn`] — in-process store with key constraints
//! - `tokio_postgres::Transaction` — the real thing (`database` feature)
//! - [`connect`] / [`migrate`] — connection and DDL (`database` feature)
mod memory;
mod transaction;

pub use memory::*;
pub use transaction::*;

#[cfg(feature = "database")]
mod connect;
#[cfg(feature = "database")]
mod postgres;

#[cfg(feature = "database")]
pub use connect::*;
