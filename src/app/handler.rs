//! Event routing and action dispatch.
//!
//! This module implements the top-level handler that turns key events into
//! state changes and storage mutations. It is the only place where the
//! session state and storage meet.
//!
//! # Architecture
//!
//! ```text
//! Event ─┬─ modal pending? ──► PendingModal::handle_event ──► resume(continuation)
//!        └─ otherwise ───────► Action::from_event ──► dispatch(action)
//!                                                        │
//!                         storage mutation ◄─────────────┘
//!                                │
//!                         SessionState::refresh
//! ```
//!
//! Actions check their focus and selection preconditions and do nothing when
//! they are not met. Failures never leave [`handle_event`]: a vanished target
//! (`NotFound`) refreshes the view silently, anything else is logged and
//! surfaced as the footer status message. Storage rolls back the failed
//! transaction, so state stays consistent either way.
//!
//! # Example
//!
//! ```rust
//! use lyst::app::{handle_event, Event, Flow, SessionState};
//! use lyst::storage::SqliteStorage;
//!
//! let mut storage = SqliteStorage::open_in_memory()?;
//! let mut session = SessionState::new();
//!
//! for event in [Event::Char('n'), Event::Char('T'), Event::Char('o'), Event::Enter] {
//!     assert_eq!(handle_event(&mut session, &mut storage, &event), Flow::Continue);
//! }
//! assert_eq!(session.selected_list.map(|l| l.title).as_deref(), Some("To"));
//! # Ok::<(), lyst::LystError>(())
//! ```

use super::actions::Action;
use super::modal::{
    ConfirmContinuation, ModalOutcome, PendingModal, PromptContinuation, Resolution,
};
use super::modes::FocusPanel;
use super::state::SessionState;
use crate::domain::error::{LystError, Result};
use crate::storage::Storage;

/// Terminal-independent key events.
///
/// The binary translates crossterm key events into these; tests construct
/// them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A printable character (including space).
    Char(char),
    Enter,
    Esc,
    Tab,
    /// Shift+Tab.
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
    /// Ctrl+C. Quits even while a modal is open.
    Interrupt,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Prepares the initial selection.
///
/// With a `start_list` title the list is looked up by exact title (created
/// if missing), selected, and the Items panel is focused. Without one the
/// Lists panel is focused and nothing is selected.
///
/// # Errors
///
/// Returns storage errors. Called before the UI starts, so these are fatal.
pub fn startup(
    session: &mut SessionState,
    storage: &mut dyn Storage,
    start_list: Option<&str>,
) -> Result<()> {
    let _span = tracing::debug_span!("startup", start_list = ?start_list).entered();

    let Some(title) = start_list.map(str::trim).filter(|t| !t.is_empty()) else {
        session.focus = FocusPanel::Lists;
        return session.refresh(&*storage);
    };

    let list_id = match storage.find_list_by_title(title)? {
        Some(list) => {
            tracing::debug!(list_id = list.id, "opening existing list");
            list.id
        }
        None => {
            tracing::info!(title = %title, "creating start list");
            storage.create_list(title)?
        }
    };

    session.select_list_by_id(&*storage, list_id)?;
    session.focus = FocusPanel::Items;
    Ok(())
}

/// Processes one key event.
///
/// While a modal is pending the event goes to the modal and panel bindings
/// are inert. The status message from the previous event is cleared first.
///
/// # Returns
///
/// [`Flow::Quit`] on `q` (no modal open) or Ctrl+C (always). A pending
/// modal's continuation is dropped unexecuted on quit.
pub fn handle_event(session: &mut SessionState, storage: &mut dyn Storage, event: &Event) -> Flow {
    let _span = tracing::debug_span!("handle_event", event = ?event).entered();

    session.status_message = None;

    if let Some(modal) = session.pending_modal.take() {
        if *event == Event::Interrupt {
            tracing::debug!("quitting with a pending modal, continuation dropped");
            return Flow::Quit;
        }
        match modal.handle_event(event) {
            ModalOutcome::Pending(modal) => session.pending_modal = Some(modal),
            ModalOutcome::Resolved(resolution) => {
                let result = resume(session, storage, resolution);
                settle(session, &*storage, result);
            }
        }
        return Flow::Continue;
    }

    let Some(action) = Action::from_event(event) else {
        return Flow::Continue;
    };
    if action == Action::Quit {
        return Flow::Quit;
    }

    let result = dispatch(session, storage, action);
    settle(session, &*storage, result);
    Flow::Continue
}

/// Runs an action against the current focus and selection.
fn dispatch(session: &mut SessionState, storage: &mut dyn Storage, action: Action) -> Result<()> {
    tracing::debug!(?action, focus = ?session.focus, "dispatching action");

    match action {
        Action::NewList => {
            open(session, PendingModal::prompt("New list", "", PromptContinuation::CreateList));
        }
        Action::RenameList => {
            if session.focus != FocusPanel::Lists {
                return Ok(());
            }
            if let Some(list) = session.highlighted_list() {
                let modal = PendingModal::prompt(
                    "Rename list",
                    list.title.clone(),
                    PromptContinuation::RenameList { list_id: list.id },
                );
                open(session, modal);
            }
        }
        Action::AddItem => {
            if let Some(list_id) = session.selected_list_id() {
                open(session, PendingModal::prompt("New item", "", PromptContinuation::AddItem { list_id }));
            }
        }
        Action::EditItem => {
            if session.focus != FocusPanel::Items {
                return Ok(());
            }
            if let Some(item) = session.highlighted_item() {
                let modal = PendingModal::prompt(
                    "Edit item",
                    item.text.clone(),
                    PromptContinuation::EditItem { item_id: item.id },
                );
                open(session, modal);
            }
        }
        Action::Delete => {
            let modal = match session.focus {
                FocusPanel::Lists => session.highlighted_list().map(|list| {
                    PendingModal::confirm(
                        format!("Delete list '{}'?", list.title),
                        ConfirmContinuation::DeleteList { list_id: list.id },
                    )
                }),
                FocusPanel::Items => session
                    .selected_list_id()
                    .zip(session.highlighted_item().map(|item| item.id))
                    .map(|(list_id, item_id)| {
                        PendingModal::confirm(
                            "Delete this item?",
                            ConfirmContinuation::DeleteItem { list_id, item_id },
                        )
                    }),
            };
            if let Some(modal) = modal {
                open(session, modal);
            }
        }
        Action::Move(direction) => {
            if session.focus != FocusPanel::Items {
                return Ok(());
            }
            let Some((list_id, item_id)) = session
                .selected_list_id()
                .zip(session.highlighted_item().map(|item| item.id))
            else {
                return Ok(());
            };
            storage.move_item(list_id, item_id, direction)?;
            session.refresh(&*storage)?;
            session.follow_item(item_id);
        }
        Action::Activate => match session.focus {
            FocusPanel::Lists => {
                if let Some(list) = session.highlighted_list().cloned() {
                    session.select_list(&*storage, list)?;
                }
            }
            FocusPanel::Items => {
                if let Some(item_id) = session.highlighted_item().map(|item| item.id) {
                    storage.toggle_item(item_id)?;
                    session.refresh(&*storage)?;
                }
            }
        },
        Action::SwitchFocus => {
            session.focus = session.focus.toggle();
        }
        Action::Cursor(motion) => session.move_cursor(&*storage, motion)?,
        Action::Quit => {}
    }
    Ok(())
}

fn open(session: &mut SessionState, modal: PendingModal) {
    tracing::debug!(?modal, "opening modal");
    session.pending_modal = Some(modal);
}

/// Runs the continuation of a resolved modal with the user's answer.
fn resume(session: &mut SessionState, storage: &mut dyn Storage, resolution: Resolution) -> Result<()> {
    let _span = tracing::debug_span!("resume_modal", ?resolution).entered();

    match resolution {
        Resolution::Confirm {
            confirmed: false, ..
        }
        | Resolution::Prompt { text: None, .. } => {
            tracing::debug!("modal cancelled");
        }
        Resolution::Confirm {
            on_resolve: ConfirmContinuation::DeleteList { list_id },
            confirmed: true,
        } => {
            storage.delete_list(list_id)?;
            if session.selected_list_id() == Some(list_id) {
                session.clear_selection();
            }
            session.refresh(&*storage)?;
        }
        Resolution::Confirm {
            on_resolve: ConfirmContinuation::DeleteItem { list_id, item_id },
            confirmed: true,
        } => {
            storage.delete_item(list_id, item_id)?;
            session.refresh(&*storage)?;
        }
        Resolution::Prompt {
            on_resolve: PromptContinuation::CreateList,
            text: Some(title),
        } => {
            let list_id = storage.create_list(&title)?;
            session.select_list_by_id(&*storage, list_id)?;
        }
        Resolution::Prompt {
            on_resolve: PromptContinuation::RenameList { list_id },
            text: Some(title),
        } => {
            storage.rename_list(list_id, &title)?;
            session.refresh(&*storage)?;
            session.follow_list(list_id);
        }
        Resolution::Prompt {
            on_resolve: PromptContinuation::AddItem { list_id },
            text: Some(text),
        } => {
            let item_id = storage.add_item(list_id, &text)?;
            session.refresh(&*storage)?;
            session.follow_item(item_id);
        }
        Resolution::Prompt {
            on_resolve: PromptContinuation::EditItem { item_id },
            text: Some(text),
        } => {
            storage.update_item_text(item_id, &text)?;
            session.refresh(&*storage)?;
        }
    }
    Ok(())
}

/// Neutralises an action failure into a consistent, refreshed view.
fn settle(session: &mut SessionState, storage: &dyn Storage, result: Result<()>) {
    let Err(err) = result else {
        return;
    };

    if err.is_not_found() {
        tracing::debug!(error = %err, "action target vanished, refreshing");
    } else {
        tracing::error!(error = %err, "action failed");
        session.status_message = Some(status_for(&err));
    }

    if let Err(refresh_err) = session.refresh(storage) {
        tracing::error!(error = %refresh_err, "refresh after failure failed");
        session.status_message = Some(status_for(&refresh_err));
    }
}

fn status_for(err: &LystError) -> String {
    match err {
        LystError::Storage(_) => err.to_string(),
        other => format!("Storage error: {other}"),
    }
}
