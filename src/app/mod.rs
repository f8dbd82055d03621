//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the terminal event loop (main.rs) and the
//! domain/storage layers. It owns the interaction state machine: which panel
//! is focused, which rows are selected, and whether a modal is waiting for an
//! answer.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Key → Event → handle_event → (modal | Action) → Storage mutation → refresh
//!                                                                      ↓
//!                              render ← UIViewModel ← compute_viewmodel
//! ```
//!
//! # Modules
//!
//! - [`actions`]: The fixed action set and its key bindings
//! - [`handler`]: Event routing, action dispatch, modal continuations
//! - [`modal`]: Pending confirm/prompt requests and their continuations
//! - [`modes`]: Panel focus
//! - [`state`]: Session state container and view model computation

pub mod actions;
pub mod handler;
pub mod modal;
pub mod modes;
pub mod state;

pub use actions::{Action, Motion};
pub use handler::{handle_event, startup, Event, Flow};
pub use modal::PendingModal;
pub use modes::FocusPanel;
pub use state::SessionState;
