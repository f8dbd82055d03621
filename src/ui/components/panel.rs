//! Panel component renderer.
//!
//! Renders one bordered panel: a title, then either the rows or the
//! placeholder. The focused panel gets an accent border. Scrolling to keep
//! the highlighted row visible is left to ratatui's [`ListState`].

use crate::ui::theme::Theme;
use crate::ui::viewmodel::PanelView;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding, Paragraph};
use ratatui::Frame;

/// Renders `panel` into `area`.
///
/// # Parameters
///
/// * `frame` - Frame being drawn
/// * `area` - Panel bounds including the border
/// * `panel` - Panel view model
/// * `theme` - Active color theme
pub fn render_panel(frame: &mut Frame<'_>, area: Rect, panel: &PanelView, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(panel.is_focused))
        .title(Span::styled(format!(" {} ", panel.title), theme.title()))
        .padding(Padding::horizontal(1))
        .style(theme.base());

    if let Some(empty) = &panel.empty_state {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            empty.message.as_str(),
            theme.muted(),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let rows: Vec<ListItem<'_>> = panel
        .rows
        .iter()
        .map(|row| {
            let style = if row.is_checked {
                theme.checked()
            } else {
                theme.base()
            };
            ListItem::new(Span::styled(row.label.as_str(), style))
        })
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(theme.highlight());

    let mut state = ListState::default();
    state.select(panel.highlighted);
    frame.render_stateful_widget(list, area, &mut state);
}
