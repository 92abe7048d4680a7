use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode, TextKind, TextSession};
use crate::tui::field::TextField;

use super::*;

/// Open a text session for `kind` with `initial` in the buffer
pub(super) fn begin_text(app: &mut App, kind: TextKind, initial: &str) {
    app.begin(Mode::Text(TextSession {
        kind,
        input: TextField::with_value(initial),
    }));
}

/// Keys while a text session is open: Enter commits, Esc cancels, the rest
/// go to the buffer.
pub(super) fn handle_text(app: &mut App, key: KeyEvent) {
    let Mode::Text(session) = &mut app.mode else {
        return;
    };
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            let kind = session.kind;
            close_text(app);
            on_exit(app, kind);
            app.update_table_height();
        }
        (_, KeyCode::Enter) => {
            let kind = session.kind;
            let value = session.input.value().to_string();
            match commit_text(app, kind, &value) {
                Ok(feedback) => {
                    close_text(app);
                    on_exit(app, kind);
                    finish_session(app, feedback);
                }
                Err(e) => {
                    tracing::warn!(mode = app.mode.name(), err = %e, "commit rejected");
                    app.flash_error(&e);
                }
            }
        }
        _ => {
            session.input.handle_key(key);
        }
    }
}

fn close_text(app: &mut App) {
    if let Mode::Text(session) = &mut app.mode {
        session.input.blur();
    }
    app.mode = Mode::Navigate;
}

/// Validate and apply the buffer for `kind`
fn commit_text(app: &mut App, kind: TextKind, value: &str) -> Result<Feedback, EditError> {
    match kind {
        TextKind::Annotate { id, replace } => commit_annotation(app, id, replace, value),
        TextKind::Description { id } => commit_description(app, id, value),
        TextKind::Tags { id } => commit_tags(app, id, value),
        TextKind::Recurrence { id } => commit_recurrence(app, id, value),
        TextKind::Project { id } => commit_project(app, id, value),
        TextKind::Filter => commit_filter(app, value),
        TextKind::AddTask => commit_add_task(app, value),
        TextKind::Search(scope) => commit_search(app, scope, value),
    }
}

/// Runs whenever a session closes, committed or not
fn on_exit(app: &mut App, kind: TextKind) {
    if let TextKind::Project { .. } = kind
        && let Err(e) = app.reload()
    {
        app.flash_error(&e);
    }
}
