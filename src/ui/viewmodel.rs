//! View model types representing renderable UI state.
//!
//! View models are computed from [`SessionState`](crate::app::SessionState)
//! by `compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready strings and flags, so rendering can be
//! tested without a database.
//!
//! # Example
//!
//! ```rust
//! use lyst::ui::viewmodel::{DisplayRow, PanelView};
//!
//! let panel = PanelView {
//!     title: "Lists".to_string(),
//!     rows: vec![DisplayRow { label: "> Groceries".to_string(), is_checked: false }],
//!     highlighted: Some(0),
//!     is_focused: true,
//!     empty_state: None,
//! };
//! assert_eq!(panel.rows.len(), 1);
//! ```

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Left panel: every list, most recently touched first.
    pub lists: PanelView,

    /// Right panel: items of the selected list.
    pub items: PanelView,

    /// Bottom bar with keybindings and the transient status message.
    pub footer: FooterInfo,

    /// Modal drawn over both panels, if one is pending.
    pub modal: Option<ModalView>,
}

/// One bordered panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// Border title.
    pub title: String,

    /// Rows in display order.
    pub rows: Vec<DisplayRow>,

    /// Highlighted row index, `None` when `rows` is empty.
    pub highlighted: Option<usize>,

    /// Whether the panel receives navigation keys (accent border).
    pub is_focused: bool,

    /// Placeholder shown instead of rows.
    pub empty_state: Option<EmptyState>,
}

/// A single pre-formatted panel row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Full label including the selection marker or checkbox.
    pub label: String,

    /// Checked items are drawn dimmed.
    pub is_checked: bool,
}

/// Placeholder for a panel with nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,

    /// Error from the last action, cleared by the next key press.
    pub status: Option<String>,
}

/// Modal dialog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    Confirm {
        message: String,
        help: String,
    },
    Prompt {
        title: String,
        value: String,
        /// Cursor column in characters.
        cursor: usize,
        placeholder: String,
        help: String,
    },
}
