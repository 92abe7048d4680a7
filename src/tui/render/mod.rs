pub mod detail_view;
pub mod edit_row;
pub mod help_overlay;
pub mod status_row;
pub mod table_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, View};

/// Main render function, dispatching to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.set_viewport_height(area.height);

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | edit row (only while editing) | status row
    let edit_rows = u16::from(app.mode.is_editing());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(edit_rows),
            Constraint::Length(1),
        ])
        .split(area);

    match &app.view {
        View::Table => table_view::render_table_view(frame, app, chunks[0]),
        View::Detail(_) => detail_view::render_detail_view(frame, app, chunks[0]),
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, chunks[0]);
    }

    if edit_rows > 0 {
        edit_row::render_edit_row(frame, app, chunks[1]);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.is_empty() {
            continue;
        }
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
