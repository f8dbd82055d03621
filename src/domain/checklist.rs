//! Checklist and item domain models.
//!
//! A [`Checklist`] is a named, ordered collection of [`Item`]s. Checklists own
//! their items exclusively: deleting a checklist deletes every item in it.
//! Values of these types are snapshots returned by storage; holding one does
//! not keep the underlying row alive.

use serde::{Deserialize, Serialize};

/// Storage identifier for lists and items (auto-assigned, monotonic).
pub type Id = i64;

/// A named checklist.
///
/// # Fields
///
/// - `id`: Storage identifier
/// - `title`: Non-empty display title (not required to be unique)
/// - `created_at`: Unix milliseconds when the list was created
/// - `updated_at`: Unix milliseconds of the last mutation to the list or its items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: Id,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A single checkable entry belonging to exactly one [`Checklist`].
///
/// `sort_order` is kept dense (`1..=N`) within a list by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub list_id: Id,
    pub text: String,
    pub checked: bool,
    pub sort_order: i64,
}

impl Item {
    /// Checkbox marker shown in front of the item text.
    ///
    /// ```
    /// use lyst::domain::Item;
    ///
    /// let item = Item { id: 1, list_id: 1, text: "Milk".into(), checked: true, sort_order: 1 };
    /// assert_eq!(item.checkbox(), "[x]");
    /// ```
    #[must_use]
    pub const fn checkbox(&self) -> &'static str {
        if self.checked {
            "[x]"
        } else {
            "[ ]"
        }
    }
}

/// Returns `true` if `text` has no visible characters.
///
/// Titles and item texts must not be blank anywhere in the system.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
