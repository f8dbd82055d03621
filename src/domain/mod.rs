//! Domain layer for lyst.
//!
//! Core types and pure business rules, independent of storage engines and
//! terminal toolkits.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`checklist`]: `Checklist` and `Item` entities
//! - [`ordering`]: Sort-position arithmetic for item insert/move/delete
//!
//! # Examples
//!
//! ```
//! use lyst::domain::ordering::{move_by, Direction};
//! use lyst::domain::Item;
//!
//! let items: Vec<Item> = (1..=3)
//!     .map(|n| Item { id: n, list_id: 1, text: format!("#{n}"), checked: false, sort_order: n })
//!     .collect();
//! let moved = move_by(items, 2, Direction::Up).expect("in bounds");
//! assert_eq!(moved[1].id, 3);
//! assert_eq!(moved[1].sort_order, 2);
//! ```

pub mod checklist;
pub mod error;
pub mod ordering;

pub use checklist::{is_blank, Checklist, Id, Item};
pub use error::{Entity, LystError, Result};
pub use ordering::Direction;
