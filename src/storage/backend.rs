//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait covering every persistence
//! operation the application performs on lists and items. The trait is minimal
//! and use-case shaped rather than a generic ORM: each method maps to one user
//! action or one view refresh.
//!
//! # Contracts shared by all implementations
//!
//! - Every multi-statement mutation is atomic. A failure leaves prior state
//!   unchanged.
//! - Mutations targeting a missing id return [`LystError::NotFound`].
//! - Blank titles and texts are rejected with [`LystError::Validation`]. Text
//!   is otherwise stored verbatim; trimming is the caller's job.
//! - Item positions within a list are dense `1..=N` after every mutation.
//!
//! [`LystError::NotFound`]: crate::domain::LystError::NotFound
//! [`LystError::Validation`]: crate::domain::LystError::Validation

use crate::domain::{Checklist, Direction, Id, Item, Result};

/// Abstraction over persistent storage backends.
///
/// # Implementations
///
/// - [`SqliteStorage`](crate::storage::SqliteStorage): single-file SQLite database
///
/// # Examples
///
/// ```no_run
/// use lyst::storage::{SqliteStorage, Storage};
/// use std::path::Path;
///
/// let mut storage = SqliteStorage::open(Path::new("/tmp/lyst.db"))?;
/// let id = storage.create_list("Groceries")?;
/// storage.add_item(id, "Milk")?;
/// assert_eq!(storage.list_items(id)?.len(), 1);
/// # Ok::<(), lyst::LystError>(())
/// ```
pub trait Storage: Send {
    /// Returns all lists, most recently touched first (`updated_at` desc, `id` desc).
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_all(&self) -> Result<Vec<Checklist>>;

    /// Looks up a list by exact title.
    ///
    /// Titles are not unique; when several lists share a title an arbitrary
    /// one is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn find_list_by_title(&self, title: &str) -> Result<Option<Checklist>>;

    /// Looks up a list by id. Returns `Ok(None)` if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get_list(&self, id: Id) -> Result<Option<Checklist>>;

    /// Creates a list with `created_at = updated_at = now` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank title, or a storage error.
    fn create_list(&mut self, title: &str) -> Result<Id>;

    /// Renames a list and bumps its `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank title, `NotFound` for a missing id.
    fn rename_list(&mut self, id: Id, title: &str) -> Result<()>;

    /// Deletes a list and all of its items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing id.
    fn delete_list(&mut self, id: Id) -> Result<()>;

    /// Returns the items of a list ordered by position, then id.
    ///
    /// A missing list yields an empty vector, never stale rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn list_items(&self, list_id: Id) -> Result<Vec<Item>>;

    /// Appends an unchecked item at the end of a list and returns its id.
    ///
    /// The position lookup and the insert run in the same write transaction.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for blank text, `NotFound` for a missing list.
    fn add_item(&mut self, list_id: Id, text: &str) -> Result<Id>;

    /// Replaces an item's text.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for blank text, `NotFound` for a missing item.
    fn update_item_text(&mut self, id: Id, text: &str) -> Result<()>;

    /// Flips an item's checked flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing item.
    fn toggle_item(&mut self, id: Id) -> Result<()>;

    /// Deletes an item and renumbers the rest of its list to `1..=N`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item doesn't exist in `list_id`.
    fn delete_item(&mut self, list_id: Id, id: Id) -> Result<()>;

    /// Swaps an item with its neighbour in `direction` and rewrites the order.
    ///
    /// Moving the first item up or the last item down is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item doesn't exist in `list_id`.
    fn move_item(&mut self, list_id: Id, id: Id, direction: Direction) -> Result<()>;
}
