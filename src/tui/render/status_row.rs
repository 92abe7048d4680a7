use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(message) = app.status.message() {
        let color = if message.starts_with("Error") {
            app.theme.red
        } else {
            app.theme.text_bright
        };
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(color).bg(bg),
        ));
    } else if let Some(pattern) = app.search.pattern() {
        // Active list search, dimmed with its hit position
        let position = match app.search.matches.len() {
            0 => "no matches".to_string(),
            n => format!("{}/{}", app.search.index + 1, n),
        };
        spans.push(Span::styled(
            format!(" /{}  {}", pattern, position),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else if !app.filters.is_empty() {
        spans.push(Span::styled(
            format!(" filter: {}", app.filters.join(" ")),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let hint = match app.mode {
        Mode::Navigate => "? help",
        _ => "Enter commit  Esc cancel",
    };
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
