use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, TextKind};
use crate::tui::search::SearchScope;

use super::*;

/// Keys in the table with no session open
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // A row highlight after an edit holds back everything but movement
    if app.is_blinking_row() {
        app.table.handle_key(key);
        return;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        (_, KeyCode::Esc) => app.search.clear(),
        (_, KeyCode::Char('?')) => app.show_help = true,
        (_, KeyCode::Char('/')) => begin_search(app, SearchScope::List),
        (_, KeyCode::Char('n')) => step_list_search(app, true),
        (_, KeyCode::Char('N')) => step_list_search(app, false),
        (_, KeyCode::Char('f')) => {
            let current = app.filters.join(" ");
            begin_text(app, TextKind::Filter, &current);
        }
        (_, KeyCode::Char('+')) => begin_text(app, TextKind::AddTask, ""),
        (_, KeyCode::Enter) => {
            if let Some(task) = selected_task(app) {
                app.open_detail(task);
            }
        }
        (
            KeyModifiers::NONE | KeyModifiers::SHIFT,
            KeyCode::Char(c @ ('a' | 'A' | 'e' | 't' | 'd' | 'r' | 'p' | 'P')),
        ) => edit_selected(app, c),
        _ => {
            app.table.handle_key(key);
        }
    }
}

fn selected_task(app: &App) -> Option<crate::model::Task> {
    let id = app.selected_task_id()?;
    app.task_by_id(id).cloned()
}

/// Open the session bound to `key` on the selected task. Nothing happens
/// when no row is selected.
fn edit_selected(app: &mut App, key: char) {
    let Some(task) = selected_task(app) else {
        return;
    };
    let id = task.id;
    match key {
        'a' => begin_text(app, TextKind::Annotate { id, replace: false }, ""),
        'A' => begin_text(app, TextKind::Annotate { id, replace: true }, ""),
        'e' => begin_text(app, TextKind::Description { id }, &task.description),
        't' => begin_text(app, TextKind::Tags { id }, ""),
        'd' => begin_due(app, id, &task.due),
        'r' => begin_text(app, TextKind::Recurrence { id }, &task.recur),
        'p' => begin_text(app, TextKind::Project { id }, &task.project),
        'P' => begin_priority(app, id, &task.priority),
        _ => {}
    }
}

/// Keys while the help overlay is showing
pub(super) fn handle_help(app: &mut App, key: KeyEvent) {
    let max_scroll = app.help_lines.len().saturating_sub(1);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        KeyCode::Char('/') => begin_search(app, SearchScope::Help),
        KeyCode::Char('n') => step_help_search(app, true),
        KeyCode::Char('N') => step_help_search(app, false),
        KeyCode::Down | KeyCode::Char('j') => {
            app.help_scroll = (app.help_scroll + 1).min(max_scroll);
        }
        KeyCode::Up | KeyCode::Char('k') => app.help_scroll = app.help_scroll.saturating_sub(1),
        KeyCode::Home | KeyCode::Char('g') => app.help_scroll = 0,
        KeyCode::End | KeyCode::Char('G') => app.help_scroll = max_scroll,
        _ => {}
    }
}
