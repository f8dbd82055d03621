//! Storage layer for persistent lists and items.
//!
//! All durable state lives behind the [`Storage`] trait. The only backend is a
//! single SQLite file; the trait exists so the action dispatcher can be driven
//! against an in-memory database in tests.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `sqlite`: SQLite implementation with immediate-mode write transactions

pub mod backend;
pub mod sqlite;

pub use backend::Storage;
pub use sqlite::SqliteStorage;
