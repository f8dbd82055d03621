//! Top-level rendering coordinator.
//!
//! This module provides the rendering entry point. It lays out the two panels
//! and the footer, delegates each region to a component, and draws the modal
//! last so it sits on top.
//!
//! # Layout
//!
//! ```text
//! ┌ Lists ──────┐ ┌ <selected list title> ─────────────┐
//! │ > Groceries │ │ [ ] Milk                           │
//! │   Work      │ │ [x] Eggs                           │
//! └─────────────┘ └────────────────────────────────────┘
//!  Tab: switch  n: new list  ...
//! ```

use crate::app::SessionState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Block;
use ratatui::Frame;

/// Width of the Lists panel in columns.
const LISTS_WIDTH: u16 = 30;

/// Computes the view model from `session` and renders it.
pub fn draw(frame: &mut Frame<'_>, session: &SessionState, theme: &Theme) {
    let viewmodel = session.compute_viewmodel();
    render(frame, &viewmodel, theme);
}

/// Renders a view model into the whole frame.
///
/// # Parameters
///
/// * `frame` - Frame being drawn
/// * `vm` - Pre-computed view model
/// * `theme` - Active color theme
pub fn render(frame: &mut Frame<'_>, vm: &UIViewModel, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base()), area);

    let [main, footer] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
    let [lists, items] = Layout::horizontal([Constraint::Length(LISTS_WIDTH), Constraint::Min(0)])
        .spacing(1)
        .areas(main);

    components::render_panel(frame, lists, &vm.lists, theme);
    components::render_panel(frame, items, &vm.items, theme);
    components::render_footer(frame, footer, &vm.footer, theme);

    if let Some(modal) = &vm.modal {
        components::render_modal(frame, area, modal, theme);
    }
}
