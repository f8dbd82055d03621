//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where lyst keeps its files. The directories come from
//! the `dirs` crate so they follow each platform's conventions.

pub mod paths;

pub use paths::{data_dir, default_config_path, default_db_path, expand_tilde, log_path, APP_NAME};
