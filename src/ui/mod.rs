//! User interface rendering layer with component-based architecture.
//!
//! This module turns session state into ratatui widgets. It is a pure
//! consumer: nothing here mutates state or touches storage.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! SessionState → compute_viewmodel → UIViewModel → render → Frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level layout and rendering coordinator
//! - [`components`]: Panel, footer and modal renderers
//! - [`theme`]: Color scheme definitions and hex color conversion

pub mod components;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{draw, render};
pub use theme::Theme;
pub use viewmodel::{DisplayRow, EmptyState, FooterInfo, ModalView, PanelView, UIViewModel};
