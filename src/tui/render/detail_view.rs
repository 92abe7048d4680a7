use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::blink::BlinkTarget;
use crate::tui::detail::{DetailFieldKind, FieldAction};

use super::push_highlighted_spans;

/// Width of the label column, including padding
const LABEL_WIDTH: usize = 13;

/// Render the detail view for the open task
pub fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ds) = app.detail() else {
        return;
    };

    let bg = app.theme.background;
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let indicator_style = Style::default().fg(app.theme.highlight).bg(bg);
    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let search_re = app.detail_search.regex.as_deref();

    let mut lines: Vec<Line> = Vec::new();

    // Blank line at top for breathing room
    lines.push(Line::from(""));

    for (i, field) in ds.fields.iter().enumerate() {
        let active = i == ds.cursor;
        let blinking = app.blink_on(BlinkTarget::Field(field.kind));
        let row_bg = if blinking {
            app.theme.blink_bg
        } else if active {
            app.theme.selection_bg
        } else {
            bg
        };

        let mut spans: Vec<Span> = Vec::new();
        spans.push(if active {
            Span::styled("\u{258E}", indicator_style.bg(row_bg))
        } else {
            Span::styled(" ", Style::default().bg(row_bg))
        });

        let label = format!("{:<width$}", field.kind.label(), width = LABEL_WIDTH - 1);
        // Editable slots get the brighter label
        let mut style = if field.action == FieldAction::ReadOnly {
            label_style
        } else {
            text_style
        };
        style = style.bg(row_bg);
        if active {
            style = style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(label, style));

        let value = field.kind.value(&ds.task);
        let value_style = match field.kind {
            DetailFieldKind::Priority => text_style.fg(app.theme.priority_color(&ds.task.priority)),
            DetailFieldKind::Description => text_style.fg(app.theme.text_bright),
            _ => text_style,
        };
        push_highlighted_spans(
            &mut spans,
            &value,
            value_style.bg(row_bg),
            match_style,
            search_re,
        );
        lines.push(Line::from(spans));
    }

    if !ds.task.annotations.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {:<width$}", "Annotations", width = LABEL_WIDTH - 1),
            label_style,
        )));
        for ann in &ds.task.annotations {
            let mut spans = vec![Span::styled("   ", text_style)];
            if let Some(date) = crate::ops::dates::parse_task_date(&ann.entry) {
                spans.push(Span::styled(
                    format!("{} ", crate::ops::dates::format_iso_date(date)),
                    label_style,
                ));
            }
            push_highlighted_spans(&mut spans, &ann.description, text_style, match_style, search_re);
            lines.push(Line::from(spans));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}
