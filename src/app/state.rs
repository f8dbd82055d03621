//! Session state: focus, selection and the last storage snapshot.
//!
//! This module defines [`SessionState`], the single state container owned by
//! the event loop. It holds *references* into storage (ids and row indices)
//! plus the most recently fetched rows. Those rows are a snapshot: after any
//! storage mutation they are stale until [`SessionState::refresh`] re-queries
//! storage. There is no incremental patching.
//!
//! # State Components
//!
//! - **Focus**: which panel receives navigation keys
//! - **Selected list**: the list shown in the Items panel. Distinct from the
//!   highlighted row of the Lists panel, though moving that highlight selects
//!   the row under it.
//! - **Highlights**: one row cursor per panel, validated against the current
//!   snapshot before use
//! - **Pending modal**: when set, all input is routed to it
//! - **Status message**: last neutralised failure, cleared on the next key
//!
//! # Example
//!
//! ```rust
//! use lyst::app::SessionState;
//! use lyst::storage::{SqliteStorage, Storage};
//!
//! let mut storage = SqliteStorage::open_in_memory()?;
//! storage.create_list("Groceries")?;
//!
//! let mut session = SessionState::new();
//! session.refresh(&storage)?;
//! assert_eq!(session.visible_lists.len(), 1);
//! assert!(session.selected_list.is_none());
//! # Ok::<(), lyst::LystError>(())
//! ```

use super::actions::Motion;
use super::modal::{PendingModal, CONFIRM_HELP, PROMPT_HELP, PROMPT_PLACEHOLDER};
use super::modes::FocusPanel;
use crate::domain::{Checklist, Id, Item, Result};
use crate::storage::Storage;
use crate::ui::viewmodel::{
    DisplayRow, EmptyState, FooterInfo, ModalView, PanelView, UIViewModel,
};

/// Keybinding hints shown in the footer.
pub const KEYBINDINGS: &str =
    "Tab: switch  n: new list  r: rename  d: delete  a: add item  e: edit  [/]: move  q: quit";

pub const NO_LISTS: &str = "No lists yet \u{2014} press n";
pub const NO_SELECTION: &str = "Select a list";
pub const NO_ITEMS: &str = "No items yet \u{2014} press a";

/// Central session state container.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Panel receiving navigation keys.
    pub focus: FocusPanel,

    /// List whose items are shown in the Items panel.
    pub selected_list: Option<Checklist>,

    /// Last fetched lists, most recently touched first.
    pub visible_lists: Vec<Checklist>,

    /// Last fetched items of `selected_list`. Empty when nothing is selected.
    pub visible_items: Vec<Item>,

    /// Row cursor of the Lists panel.
    pub list_highlight: usize,

    /// Row cursor of the Items panel.
    pub item_highlight: usize,

    /// Modal awaiting an answer. Suspends panel key routing while set.
    pub pending_modal: Option<PendingModal>,

    /// Error from the last action, shown in the footer.
    pub status_message: Option<String>,
}

const fn clamp_index(index: usize, len: usize) -> usize {
    if index >= len {
        len.saturating_sub(1)
    } else {
        index
    }
}

impl SessionState {
    /// Creates a session with focus on the Lists panel and nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected_list_id(&self) -> Option<Id> {
        self.selected_list.as_ref().map(|list| list.id)
    }

    /// List under the Lists panel cursor, if the cursor is within bounds.
    #[must_use]
    pub fn highlighted_list(&self) -> Option<&Checklist> {
        self.visible_lists.get(self.list_highlight)
    }

    /// Item under the Items panel cursor, if a list is selected and the cursor
    /// is within bounds.
    #[must_use]
    pub fn highlighted_item(&self) -> Option<&Item> {
        self.selected_list.as_ref()?;
        self.visible_items.get(self.item_highlight)
    }

    /// Whether input is currently routed to a modal.
    #[must_use]
    pub const fn has_modal(&self) -> bool {
        self.pending_modal.is_some()
    }

    /// Re-reads both panels from storage.
    ///
    /// Lists are refreshed first because a vanished selected list clears the
    /// Items panel.
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails. The snapshot of the panel being
    /// refreshed is left as it was.
    pub fn refresh(&mut self, storage: &dyn Storage) -> Result<()> {
        self.refresh_lists(storage)?;
        self.refresh_items(storage)
    }

    /// Re-reads the Lists panel.
    ///
    /// The selected list snapshot is replaced with its fresh row and the
    /// highlight follows it. If the selected list no longer exists the
    /// selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn refresh_lists(&mut self, storage: &dyn Storage) -> Result<()> {
        let _span = tracing::debug_span!("refresh_lists").entered();

        self.visible_lists = storage.list_all()?;

        if let Some(selected_id) = self.selected_list_id() {
            match self.visible_lists.iter().position(|l| l.id == selected_id) {
                Some(index) => {
                    self.selected_list = Some(self.visible_lists[index].clone());
                    self.list_highlight = index;
                }
                None => {
                    tracing::debug!(list_id = selected_id, "selected list vanished");
                    self.clear_selection();
                }
            }
        }
        self.list_highlight = clamp_index(self.list_highlight, self.visible_lists.len());

        tracing::debug!(
            count = self.visible_lists.len(),
            highlight = self.list_highlight,
            "lists refreshed"
        );
        Ok(())
    }

    /// Re-reads the Items panel for the selected list.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn refresh_items(&mut self, storage: &dyn Storage) -> Result<()> {
        let _span = tracing::debug_span!("refresh_items", list_id = ?self.selected_list_id()).entered();

        self.visible_items = match self.selected_list_id() {
            Some(list_id) => storage.list_items(list_id)?,
            None => Vec::new(),
        };
        self.item_highlight = clamp_index(self.item_highlight, self.visible_items.len());

        tracing::debug!(count = self.visible_items.len(), "items refreshed");
        Ok(())
    }

    /// Makes `list` the selected list and loads its items. Focus is unchanged.
    ///
    /// The Items cursor is reset unless `list` was already selected.
    ///
    /// # Errors
    ///
    /// Returns an error if loading the items fails.
    pub fn select_list(&mut self, storage: &dyn Storage, list: Checklist) -> Result<()> {
        tracing::debug!(list_id = list.id, title = %list.title, "selecting list");

        if self.selected_list_id() != Some(list.id) {
            self.item_highlight = 0;
        }
        if let Some(index) = self.visible_lists.iter().position(|l| l.id == list.id) {
            self.list_highlight = index;
        }
        self.selected_list = Some(list);
        self.refresh_items(storage)
    }

    /// Selects the list with `id` after re-reading the Lists panel.
    ///
    /// Returns `false` if no such list exists.
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails.
    pub fn select_list_by_id(&mut self, storage: &dyn Storage, id: Id) -> Result<bool> {
        self.refresh_lists(storage)?;
        let Some(list) = self.visible_lists.iter().find(|l| l.id == id).cloned() else {
            return Ok(false);
        };
        self.select_list(storage, list)?;
        Ok(true)
    }

    /// Drops the selected list and its items snapshot.
    pub fn clear_selection(&mut self) {
        self.selected_list = None;
        self.visible_items.clear();
        self.item_highlight = 0;
    }

    /// Moves the cursor of the focused panel.
    ///
    /// In the Lists panel the list under the new cursor becomes the selected
    /// list. Does nothing in an empty panel.
    ///
    /// # Errors
    ///
    /// Returns an error if loading the newly selected list's items fails.
    pub fn move_cursor(&mut self, storage: &dyn Storage, motion: Motion) -> Result<()> {
        match self.focus {
            FocusPanel::Lists => {
                let Some(index) = motion.apply(self.list_highlight, self.visible_lists.len()) else {
                    return Ok(());
                };
                self.list_highlight = index;
                let list = self.visible_lists[index].clone();
                self.select_list(storage, list)
            }
            FocusPanel::Items => {
                if let Some(index) = motion.apply(self.item_highlight, self.visible_items.len()) {
                    self.item_highlight = index;
                }
                Ok(())
            }
        }
    }

    /// Points the Lists cursor at `list_id` if it is visible.
    pub fn follow_list(&mut self, list_id: Id) {
        if let Some(index) = self.visible_lists.iter().position(|list| list.id == list_id) {
            self.list_highlight = index;
        }
    }

    /// Points the Items cursor at `item_id` if it is visible.
    pub fn follow_item(&mut self, item_id: Id) {
        if let Some(index) = self.visible_items.iter().position(|item| item.id == item_id) {
            self.item_highlight = index;
        }
    }

    /// Computes a renderable view model from the current snapshot.
    ///
    /// # Returns
    ///
    /// A [`UIViewModel`] with both panels, the footer, and the pending modal
    /// (if any).
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        UIViewModel {
            lists: self.compute_lists_panel(),
            items: self.compute_items_panel(),
            footer: FooterInfo {
                keybindings: KEYBINDINGS.to_string(),
                status: self.status_message.clone(),
            },
            modal: self.pending_modal.as_ref().map(Self::compute_modal),
        }
    }

    fn compute_lists_panel(&self) -> PanelView {
        let selected_id = self.selected_list_id();
        let rows: Vec<DisplayRow> = self
            .visible_lists
            .iter()
            .map(|list| {
                let marker = if Some(list.id) == selected_id { "> " } else { "  " };
                DisplayRow {
                    label: format!("{marker}{}", list.title),
                    is_checked: false,
                }
            })
            .collect();

        let empty_state = rows.is_empty().then(|| EmptyState {
            message: NO_LISTS.to_string(),
        });

        PanelView {
            title: "Lists".to_string(),
            highlighted: (!rows.is_empty()).then_some(self.list_highlight),
            rows,
            is_focused: self.focus.is_lists(),
            empty_state,
        }
    }

    fn compute_items_panel(&self) -> PanelView {
        let rows: Vec<DisplayRow> = self
            .visible_items
            .iter()
            .map(|item| DisplayRow {
                label: format!("{} {}", item.checkbox(), item.text),
                is_checked: item.checked,
            })
            .collect();

        let empty_state = match (&self.selected_list, rows.is_empty()) {
            (None, _) => Some(NO_SELECTION),
            (Some(_), true) => Some(NO_ITEMS),
            (Some(_), false) => None,
        }
        .map(|message| EmptyState {
            message: message.to_string(),
        });

        PanelView {
            title: self
                .selected_list
                .as_ref()
                .map(|list| list.title.clone())
                .unwrap_or_default(),
            highlighted: (!rows.is_empty()).then_some(self.item_highlight),
            rows,
            is_focused: self.focus.is_items(),
            empty_state,
        }
    }

    fn compute_modal(modal: &PendingModal) -> ModalView {
        match modal {
            PendingModal::Confirm { message, .. } => ModalView::Confirm {
                message: message.clone(),
                help: CONFIRM_HELP.to_string(),
            },
            PendingModal::Prompt { title, input, .. } => ModalView::Prompt {
                title: title.clone(),
                value: input.value().to_string(),
                cursor: input.cursor_column(),
                placeholder: PROMPT_PLACEHOLDER.to_string(),
                help: PROMPT_HELP.to_string(),
            },
        }
    }
}
