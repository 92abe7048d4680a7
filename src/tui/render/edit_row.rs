use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{PRIORITY_OPTIONS, priority_label};
use crate::ops::dates::format_iso_date;
use crate::tui::app::{App, Mode, TextKind};
use crate::tui::search::SearchScope;
use crate::util::unicode::display_width;

/// Prompt shown before a text buffer
fn prompt(kind: TextKind) -> String {
    match kind {
        TextKind::Annotate { id, replace: false } => format!("Annotate {}: ", id),
        TextKind::Annotate { id, replace: true } => format!("Replace annotations {}: ", id),
        TextKind::Description { id } => format!("Description {}: ", id),
        TextKind::Tags { id } => format!("Tags {} (+add -remove): ", id),
        TextKind::Recurrence { id } => format!("Recur {}: ", id),
        TextKind::Project { id } => format!("Project {}: ", id),
        TextKind::Filter => "Filter: ".to_string(),
        TextKind::AddTask => "Add: ".to_string(),
        TextKind::Search(SearchScope::List) => "/".to_string(),
        TextKind::Search(SearchScope::Help) => "Help /".to_string(),
        TextKind::Search(SearchScope::Detail) => "Detail /".to_string(),
    }
}

/// Render the one-line editor for the open session
pub fn render_edit_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let prompt_style = Style::default().fg(app.theme.highlight).bg(bg);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let line = match &app.mode {
        Mode::Navigate => return,
        Mode::Text(session) => {
            let prompt = prompt(session.kind);
            let cursor_x = area.x as usize + display_width(&prompt) + session.input.cursor_col();
            if session.input.is_focused() && cursor_x < (area.x + area.width) as usize {
                frame.set_cursor_position(Position::new(cursor_x as u16, area.y));
            }
            Line::from(vec![
                Span::styled(prompt, prompt_style),
                Span::styled(session.input.value().to_string(), text_style),
            ])
        }
        Mode::Due(session) => Line::from(vec![
            Span::styled(format!("Due {}: ", session.id), prompt_style),
            Span::styled(format_iso_date(session.date), text_style),
            Span::styled("  h/l day  k/j week  Enter set  Esc cancel", dim_style),
        ]),
        Mode::Priority(session) => {
            let mut spans = vec![Span::styled(format!("Priority {}: ", session.id), prompt_style)];
            for (i, option) in PRIORITY_OPTIONS.iter().enumerate() {
                let label = format!(" {} ", priority_label(option));
                let style = if i == session.index {
                    Style::default()
                        .fg(app.theme.background)
                        .bg(app.theme.priority_color(option))
                        .add_modifier(Modifier::BOLD)
                } else {
                    dim_style
                };
                spans.push(Span::styled(label, style));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::PrioritySession;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn priority_selector_lists_options() {
        let (mut app, _store) = app_with_tasks(sample_tasks());
        app.begin(Mode::Priority(PrioritySession { id: 1, index: 1 }));
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_edit_row(frame, &app, area);
        });
        assert_eq!(output, "Priority 1:  High  Medium  Low  None");
    }

    #[test]
    fn prompts_name_the_task() {
        assert_eq!(prompt(TextKind::Tags { id: 3 }), "Tags 3 (+add -remove): ");
        assert_eq!(prompt(TextKind::Search(SearchScope::List)), "/");
    }
}
