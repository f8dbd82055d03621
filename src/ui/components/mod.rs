//! Composable UI component renderers.
//!
//! Each component draws one part of the screen into a ratatui [`Frame`]
//! from a slice of the view model. Components never read session state or
//! storage.
//!
//! # Components
//!
//! - [`panel`]: Bordered list panel (used for both Lists and Items)
//! - [`footer`]: Keybinding hints or the status message
//! - [`modal`]: Centered confirm/prompt dialog drawn over everything else
//!
//! [`Frame`]: ratatui::Frame

mod footer;
mod modal;
mod panel;

pub use footer::render_footer;
pub use modal::render_modal;
pub use panel::render_panel;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Returns a `width` x `height` rectangle centered in `area`, shrunk to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
