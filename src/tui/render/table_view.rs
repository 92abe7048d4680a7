use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::blink::BlinkTarget;
use crate::tui::table::{COLUMN_WIDTHS, COLUMNS, ID_COLUMN};
use crate::util::unicode::{fit_to_width, strip_ansi};

/// Cell widths for a table `total` cells wide. The description column
/// takes whatever the fixed columns leave, at least 10.
pub fn column_widths(total: u16) -> [usize; COLUMNS.len()] {
    let gaps = COLUMNS.len() as u16 - 1;
    let fixed: u16 = COLUMN_WIDTHS.iter().sum();
    let flex = total.saturating_sub(fixed + gaps).max(10);
    let mut widths = [0usize; COLUMNS.len()];
    for (i, w) in COLUMN_WIDTHS.iter().enumerate() {
        widths[i] = if *w == 0 { flex as usize } else { *w as usize };
    }
    widths
}

/// Render the task table: a header line and the visible rows
pub fn render_table_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let widths = column_widths(area.width);
    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);

    let header_style = Style::default()
        .fg(app.theme.header)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let mut header = Vec::new();
    for (i, name) in COLUMNS.iter().enumerate() {
        if i > 0 {
            header.push(Span::styled(" ", Style::default().bg(bg)));
        }
        header.push(Span::styled(fit_to_width(name, widths[i]), header_style));
    }
    lines.push(Line::from(header));

    if app.table.is_empty() {
        lines.push(Line::from(Span::styled(
            " No matching tasks",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    let start = app.table.offset();
    let end = (start + app.table.height()).min(app.table.len());
    for (r, row) in app.table.rows()[start..end].iter().enumerate() {
        let r = start + r;
        let selected = r == app.table.cursor();
        let blinking = strip_ansi(&row[ID_COLUMN])
            .trim()
            .parse::<u32>()
            .is_ok_and(|id| app.blink_on(BlinkTarget::Row(id)));
        let row_bg = if blinking {
            app.theme.blink_bg
        } else if selected {
            app.theme.selection_bg
        } else {
            bg
        };

        let mut spans = Vec::with_capacity(row.len() * 2);
        for (c, cell) in row.iter().enumerate() {
            if c > 0 {
                spans.push(Span::styled(" ", Style::default().bg(row_bg)));
            }
            let text = fit_to_width(&strip_ansi(cell), widths[c]);
            let fg = if c == 0 {
                app.theme.priority_color(cell)
            } else {
                app.theme.text
            };
            let mut style = Style::default().fg(fg).bg(row_bg);
            if app.search.matches.contains(&(r, c)) {
                style = style
                    .fg(app.theme.search_match_fg)
                    .bg(app.theme.search_match_bg);
            }
            if selected && c == app.table.column_cursor() {
                style = style
                    .bg(app.theme.cell_cursor_bg)
                    .fg(app.theme.text_bright)
                    .add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}
