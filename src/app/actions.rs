//! Named actions and their key bindings.
//!
//! This module defines the fixed [`Action`] set the dispatcher understands and
//! the mapping from panel-level key events to actions. Modal-local keys never
//! pass through here: while a modal is pending the handler routes input to the
//! modal first.
//!
//! # Key Bindings
//!
//! | Key | Action |
//! |---|---|
//! | Tab / Shift+Tab | [`Action::SwitchFocus`] |
//! | n | [`Action::NewList`] |
//! | r | [`Action::RenameList`] |
//! | d | [`Action::Delete`] |
//! | a | [`Action::AddItem`] |
//! | e | [`Action::EditItem`] |
//! | `[` / `]` | [`Action::MOVE_UP`] / [`Action::MOVE_DOWN`] |
//! | Enter / Space | [`Action::Activate`] |
//! | Up, k / Down, j | [`Action::Cursor`] with [`Motion::Up`] / [`Motion::Down`] |
//! | Home, g / End, G | [`Action::Cursor`] with [`Motion::First`] / [`Motion::Last`] |
//! | q, Ctrl+C | [`Action::Quit`] |

use super::handler::Event;
use crate::domain::Direction;

/// Commands the dispatcher executes against the session and storage.
///
/// Each action carries an implicit precondition on focus and selection. When
/// the precondition does not hold the action does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Opens the "New list" prompt.
    NewList,
    /// Opens the "Rename list" prompt for the highlighted list (Lists focus).
    RenameList,
    /// Opens the "New item" prompt for the selected list.
    AddItem,
    /// Opens the "Edit item" prompt for the highlighted item (Items focus).
    EditItem,
    /// Asks for confirmation, then deletes the highlighted list or item.
    Delete,
    /// Swaps the highlighted item with its neighbour (Items focus).
    Move(Direction),
    /// Lists focus: selects the highlighted list. Items focus: toggles the item.
    Activate,
    /// Toggles between the two panels.
    SwitchFocus,
    /// Moves the highlight within the focused panel.
    Cursor(Motion),
    Quit,
}

/// Highlight movement within a panel. Movement is clamped, never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    First,
    Last,
}

impl Motion {
    /// Index reached from `index` in a panel of `len` rows, or `None` if the
    /// panel is empty.
    #[must_use]
    pub fn apply(self, index: usize, len: usize) -> Option<usize> {
        let last = len.checked_sub(1)?;
        Some(match self {
            Self::Up => index.saturating_sub(1).min(last),
            Self::Down => (index + 1).min(last),
            Self::First => 0,
            Self::Last => last,
        })
    }
}

impl Action {
    pub const MOVE_UP: Self = Self::Move(Direction::Up);
    pub const MOVE_DOWN: Self = Self::Move(Direction::Down);

    /// Maps a key event to an action, if it is bound.
    #[must_use]
    pub fn from_event(event: &Event) -> Option<Self> {
        let action = match event {
            Event::Tab | Event::BackTab => Self::SwitchFocus,
            Event::Enter | Event::Char(' ') => Self::Activate,
            Event::Up | Event::Char('k') => Self::Cursor(Motion::Up),
            Event::Down | Event::Char('j') => Self::Cursor(Motion::Down),
            Event::Home | Event::Char('g') => Self::Cursor(Motion::First),
            Event::End | Event::Char('G') => Self::Cursor(Motion::Last),
            Event::Char('n') => Self::NewList,
            Event::Char('r') => Self::RenameList,
            Event::Char('d') => Self::Delete,
            Event::Char('a') => Self::AddItem,
            Event::Char('e') => Self::EditItem,
            Event::Char('[') => Self::MOVE_UP,
            Event::Char(']') => Self::MOVE_DOWN,
            Event::Char('q') | Event::Interrupt => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}
