//! SQLite backend for the Sevak volunteer store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. That single-threaded call queue is
//! also what serializes the store's read-modify-write sections (sequential-ID
//! assignment, officer-slot conflict checks); the schema's unique constraints
//! remain the authoritative guard.

mod encode;
mod schema;
mod store;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;
