//! Modal request/response protocol.
//!
//! Destructive and text-entry actions do not touch storage directly. Instead
//! the dispatcher parks a [`PendingModal`] in the session state together with
//! a continuation describing what to do once the user answers. While a modal
//! is pending every key is routed to it and the panels are inert.
//!
//! # Architecture
//!
//! ```text
//! Action ──► PendingModal { kind, on_resolve } ──► (keys) ──► Resolution ──► continuation
//! ```
//!
//! [`PendingModal::handle_event`] consumes the modal. It either hands the
//! modal back unresolved or produces a [`Resolution`] that owns the
//! continuation, so a continuation can run at most once. Dropping a pending
//! modal (for example on quit) drops its continuation without running it.
//!
//! # Example
//!
//! ```rust
//! use lyst::app::modal::{ConfirmContinuation, ModalOutcome, PendingModal, Resolution};
//! use lyst::app::Event;
//!
//! let modal = PendingModal::confirm("Delete this item?", ConfirmContinuation::DeleteItem {
//!     list_id: 1,
//!     item_id: 7,
//! });
//! let ModalOutcome::Resolved(Resolution::Confirm { confirmed, .. }) = modal.handle_event(&Event::Char('y')) else {
//!     panic!("y resolves a confirm modal");
//! };
//! assert!(confirmed);
//! ```

use super::handler::Event;
use crate::domain::Id;

/// Help line shown under a confirmation message.
pub const CONFIRM_HELP: &str = "Press y to confirm, n to cancel.";
/// Help line shown under a text prompt.
pub const PROMPT_HELP: &str = "Enter to save, Esc to cancel.";
/// Placeholder shown in an empty text prompt.
pub const PROMPT_PLACEHOLDER: &str = "Type and press Enter";

/// Deferred mutation run after a yes/no question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmContinuation {
    DeleteList { list_id: Id },
    DeleteItem { list_id: Id, item_id: Id },
}

/// Deferred mutation run after a text prompt is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptContinuation {
    CreateList,
    RenameList { list_id: Id },
    AddItem { list_id: Id },
    EditItem { item_id: Id },
}

/// Single-line text editor backing a prompt.
///
/// The cursor is a byte offset that always sits on a `char` boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an input holding `prefill` with the cursor at the end.
    #[must_use]
    pub fn new(prefill: impl Into<String>) -> Self {
        let value = prefill.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters, for rendering.
    #[must_use]
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Trimmed value, or `None` if nothing but whitespace was entered.
    #[must_use]
    pub fn submit(&self) -> Option<String> {
        let trimmed = self.value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

/// A modal waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingModal {
    /// Yes/no question. Bindings: y confirms, n or Esc cancels.
    Confirm {
        message: String,
        on_resolve: ConfirmContinuation,
    },
    /// Free-text question. Bindings: Enter submits, Esc cancels.
    Prompt {
        title: String,
        input: TextInput,
        on_resolve: PromptContinuation,
    },
}

/// A resolved modal, carrying its continuation and the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Confirm {
        on_resolve: ConfirmContinuation,
        confirmed: bool,
    },
    /// `text` is `None` on cancel or whitespace-only submission.
    Prompt {
        on_resolve: PromptContinuation,
        text: Option<String>,
    },
}

/// Result of feeding one event to a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Pending(PendingModal),
    Resolved(Resolution),
}

impl PendingModal {
    #[must_use]
    pub fn confirm(message: impl Into<String>, on_resolve: ConfirmContinuation) -> Self {
        Self::Confirm {
            message: message.into(),
            on_resolve,
        }
    }

    #[must_use]
    pub fn prompt(
        title: impl Into<String>,
        prefill: impl Into<String>,
        on_resolve: PromptContinuation,
    ) -> Self {
        Self::Prompt {
            title: title.into(),
            input: TextInput::new(prefill),
            on_resolve,
        }
    }

    /// Applies a key to the modal.
    ///
    /// Keys outside the modal's own bindings leave it unchanged.
    #[must_use]
    pub fn handle_event(self, event: &Event) -> ModalOutcome {
        match self {
            Self::Confirm {
                message,
                on_resolve,
            } => match event {
                Event::Char('y' | 'Y') => ModalOutcome::Resolved(Resolution::Confirm {
                    on_resolve,
                    confirmed: true,
                }),
                Event::Char('n' | 'N') | Event::Esc => {
                    ModalOutcome::Resolved(Resolution::Confirm {
                        on_resolve,
                        confirmed: false,
                    })
                }
                _ => ModalOutcome::Pending(Self::Confirm {
                    message,
                    on_resolve,
                }),
            },
            Self::Prompt {
                title,
                mut input,
                on_resolve,
            } => {
                match event {
                    Event::Enter => {
                        return ModalOutcome::Resolved(Resolution::Prompt {
                            on_resolve,
                            text: input.submit(),
                        })
                    }
                    Event::Esc => {
                        return ModalOutcome::Resolved(Resolution::Prompt {
                            on_resolve,
                            text: None,
                        })
                    }
                    Event::Char(c) => input.insert(*c),
                    Event::Backspace => input.backspace(),
                    Event::Delete => input.delete(),
                    Event::Left => input.left(),
                    Event::Right => input.right(),
                    Event::Home => input.home(),
                    Event::End => input.end(),
                    _ => {}
                }
                ModalOutcome::Pending(Self::Prompt {
                    title,
                    input,
                    on_resolve,
                })
            }
        }
    }
}
