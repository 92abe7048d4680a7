use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ExternalEdit, TextKind};
use crate::tui::detail::FieldAction;
use crate::tui::search::SearchScope;

use super::*;

/// Keys in the detail view with no session open
pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => {
            app.detail_search.clear();
            app.close_detail();
        }
        (_, KeyCode::Char('/')) | (_, KeyCode::Char('?')) => {
            begin_search(app, SearchScope::Detail)
        }
        // Detail hits are highlighted only; there is no hit cursor
        (_, KeyCode::Char('n')) | (_, KeyCode::Char('N')) => {}
        (_, KeyCode::Char('i')) | (_, KeyCode::Enter) => enter_field_edit(app),
        _ => {
            let Some(ds) = app.detail_mut() else {
                return;
            };
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => ds.move_up(),
                KeyCode::Down | KeyCode::Char('j') => ds.move_down(),
                KeyCode::Home | KeyCode::Char('g') => ds.move_first(),
                KeyCode::End | KeyCode::Char('G') => ds.move_last(),
                _ => {}
            }
        }
    }
}

/// Open the session the slot under the cursor maps to
pub(super) fn enter_field_edit(app: &mut App) {
    let Some(ds) = app.detail() else {
        return;
    };
    let Some(field) = ds.current().copied() else {
        return;
    };
    let task = ds.task.clone();
    tracing::debug!(id = task.id, field = field.kind.label(), "edit field");
    match field.action {
        FieldAction::ReadOnly => {}
        FieldAction::PrioritySelect => begin_priority(app, task.id, &task.priority),
        FieldAction::TagsEdit => begin_text(app, TextKind::Tags { id: task.id }, ""),
        FieldAction::DueStep => begin_due(app, task.id, &task.due),
        FieldAction::ProjectEdit => {
            begin_text(app, TextKind::Project { id: task.id }, &task.project)
        }
        FieldAction::RecurrenceEdit => {
            begin_text(app, TextKind::Recurrence { id: task.id }, &task.recur)
        }
        FieldAction::ExternalEditor => {
            app.clear_editing_modes();
            app.pending_editor = Some(ExternalEdit {
                id: task.id,
                text: task.description,
            });
        }
    }
}
