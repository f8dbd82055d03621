//! Structured logging to a rotating file.
//!
//! The terminal belongs to the UI, so log output never goes to stdout or
//! stderr. Events from `tracing` macros are formatted by `tracing-subscriber`
//! and appended to `lyst.log` in the data directory.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → lyst.log (+ backups)
//! ```
//!
//! # Configuration
//!
//! The level is resolved in this order:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` from the config file or `--trace-level`
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust,no_run
//! use lyst::observability::init_tracing;
//! use lyst::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("logging initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup and level resolution
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
