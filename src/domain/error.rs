//! Error types for lyst.
//!
//! This module defines the centralized error type [`LystError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! The variants mirror how the application reacts to a failure:
//!
//! - [`LystError::NotFound`]: the target row vanished; the UI refreshes silently
//! - [`LystError::Validation`]: blank title or text reached the storage layer
//! - [`LystError::Storage`] / [`LystError::Io`]: the in-progress action is aborted
//!   and nothing is partially applied
//! - [`LystError::Config`] / [`LystError::Theme`]: startup configuration problems

use thiserror::Error;

/// The kind of row a [`LystError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    List,
    Item,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Item => f.write_str("item"),
        }
    }
}

/// The main error type for lyst operations.
///
/// # Examples
///
/// ```
/// use lyst::domain::error::{Entity, LystError};
///
/// let err = LystError::NotFound { entity: Entity::List, id: 7 };
/// assert!(err.is_not_found());
/// assert_eq!(err.to_string(), "list 7 not found");
/// ```
#[derive(Debug, Error)]
pub enum LystError {
    /// A mutation targeted an id that no longer exists.
    ///
    /// Usually a stale selection after an external deletion. Treated as a
    /// silent no-op by the dispatcher.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Which table the id was looked up in.
        entity: Entity,
        /// The missing id.
        id: i64,
    },

    /// A title or item text was empty after trimming.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The SQLite engine reported a failure.
    ///
    /// Any open transaction has been rolled back when this surfaces.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme file is unreadable or malformed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl LystError {
    /// Returns `true` for [`LystError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`LystError::Validation`].
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub(crate) const fn list_not_found(id: i64) -> Self {
        Self::NotFound { entity: Entity::List, id }
    }

    pub(crate) const fn item_not_found(id: i64) -> Self {
        Self::NotFound { entity: Entity::Item, id }
    }
}

/// A specialized `Result` type for lyst operations.
pub type Result<T> = std::result::Result<T, LystError>;
