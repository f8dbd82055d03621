//! Modal dialog renderer.
//!
//! Draws a fixed-width dialog centered over the panels, clearing what is
//! underneath. Prompts also place the terminal cursor inside the input box.
//!
//! # Layout
//!
//! ```text
//! ╭──────────────────────────────╮      ╭──────────────────────────────╮
//! │ Delete this item?            │      │ New item                     │
//! │                              │      │ ┌──────────────────────────┐ │
//! │ Press y to confirm, n to ... │      │ │ Milk_                    │ │
//! ╰──────────────────────────────╯      │ └──────────────────────────┘ │
//!                                       │ Enter to save, Esc to cancel.│
//!                                       ╰──────────────────────────────╯
//! ```

use super::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ModalView;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};
use ratatui::Frame;

const MODAL_WIDTH: u16 = 60;
const CONFIRM_HEIGHT: u16 = 7;
const PROMPT_HEIGHT: u16 = 9;

/// Renders `modal` centered in `area`.
pub fn render_modal(frame: &mut Frame<'_>, area: Rect, modal: &ModalView, theme: &Theme) {
    let height = match modal {
        ModalView::Confirm { .. } => CONFIRM_HEIGHT,
        ModalView::Prompt { .. } => PROMPT_HEIGHT,
    };
    let rect = centered_rect(MODAL_WIDTH, height, area);

    let surface = Style::default()
        .fg(Theme::color(&theme.colors.text))
        .bg(Theme::color(&theme.colors.modal_bg));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(true))
        .padding(Padding::new(2, 2, 1, 1))
        .style(surface);
    let inner = block.inner(rect);

    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);

    let heading = Style::default().add_modifier(Modifier::BOLD);

    match modal {
        ModalView::Confirm { message, help } => {
            let body = vec![
                Line::from(Span::styled(message.as_str(), heading)),
                Line::from(""),
                Line::from(Span::styled(help.as_str(), theme.muted())),
            ];
            frame.render_widget(Paragraph::new(body), inner);
        }
        ModalView::Prompt {
            title,
            value,
            cursor,
            placeholder,
            help,
        } => {
            let [title_area, input_area, help_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(inner);

            frame.render_widget(Paragraph::new(Span::styled(title.as_str(), heading)), title_area);

            let input_block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(true))
                .style(theme.base());
            let text_area = input_block.inner(input_area);
            frame.render_widget(input_block, input_area);

            let width = usize::from(text_area.width.max(1));
            let offset = cursor.saturating_sub(width - 1);
            let text = if value.is_empty() {
                Line::from(Span::styled(placeholder.as_str(), theme.muted()))
            } else {
                Line::from(value.chars().skip(offset).collect::<String>())
            };
            frame.render_widget(Paragraph::new(text), text_area);

            let column = u16::try_from(cursor - offset).unwrap_or(text_area.width);
            frame.set_cursor_position(Position::new(
                text_area.x + column.min(text_area.width.saturating_sub(1)),
                text_area.y,
            ));

            frame.render_widget(Paragraph::new(Span::styled(help.as_str(), theme.muted())), help_area);
        }
    }
}
