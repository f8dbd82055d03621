//! Panel focus state.
//!
//! The screen has two panels side by side. Exactly one of them receives
//! navigation keys at a time; which one also decides what "the highlighted
//! row" means for actions like delete or rename.
//!
//! # Example
//!
//! ```rust
//! use lyst::app::modes::FocusPanel;
//!
//! let focus = FocusPanel::Lists;
//! assert_eq!(focus.toggle(), FocusPanel::Items);
//! ```

/// Panel currently receiving navigation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPanel {
    /// Left panel listing every checklist.
    ///
    /// Active keybindings: j/k (highlight and select), r (rename), d (delete list).
    #[default]
    Lists,

    /// Right panel showing the items of the selected checklist.
    ///
    /// Active keybindings: j/k (highlight), enter (toggle), e (edit),
    /// d (delete item), [ and ] (reorder).
    Items,
}

impl FocusPanel {
    /// Returns the other panel.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Lists => Self::Items,
            Self::Items => Self::Lists,
        }
    }

    #[must_use]
    pub const fn is_lists(self) -> bool {
        matches!(self, Self::Lists)
    }

    #[must_use]
    pub const fn is_items(self) -> bool {
        matches!(self, Self::Items)
    }
}
