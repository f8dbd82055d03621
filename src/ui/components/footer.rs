//! Footer component renderer.
//!
//! This module renders the one-line footer bar. A pending status message
//! replaces the keybinding hints until the next key press.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Renders the footer bar into `area`.
///
/// Text that exceeds the width is clipped by ratatui.
pub fn render_footer(frame: &mut Frame<'_>, area: Rect, footer: &FooterInfo, theme: &Theme) {
    let line = match &footer.status {
        Some(status) => Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(Theme::color(&theme.colors.error)),
        )),
        None => Line::from(Span::styled(
            format!(" {}", footer.keybindings),
            theme.muted(),
        )),
    };

    let bar = Paragraph::new(line).style(
        Style::default()
            .fg(Theme::color(&theme.colors.text))
            .bg(Theme::color(&theme.colors.footer_bg)),
    );
    frame.render_widget(bar, area);
}
