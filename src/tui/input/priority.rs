use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{PRIORITY_OPTIONS, priority_index};
use crate::ops::validate::validate_priority;
use crate::tui::app::{App, Mode, PrioritySession};
use crate::tui::detail::DetailFieldKind;

use super::*;

pub(super) fn begin_priority(app: &mut App, id: u32, current: &str) {
    app.begin(Mode::Priority(PrioritySession {
        id,
        index: priority_index(current),
    }));
}

pub(super) fn handle_priority(app: &mut App, key: KeyEvent) {
    let Mode::Priority(session) = &mut app.mode else {
        return;
    };
    let len = PRIORITY_OPTIONS.len();
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => session.index = (session.index + len - 1) % len,
        KeyCode::Right | KeyCode::Char('l') => session.index = (session.index + 1) % len,
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.update_table_height();
        }
        KeyCode::Enter => {
            let PrioritySession { id, index } = *session;
            if let Err(e) = commit_priority(app, id, PRIORITY_OPTIONS[index]) {
                tracing::warn!(id, err = %e, "priority rejected");
                app.flash_error(&e);
            }
        }
        _ => {}
    }
}

fn commit_priority(app: &mut App, id: u32, priority: &str) -> Result<(), EditError> {
    validate_priority(priority)?;
    app.store_mut().set_priority(id, priority)?;
    tracing::info!(id, priority, "priority set");
    app.reload()?;
    app.mode = Mode::Navigate;
    let target = app.edit_feedback(id, Some(DetailFieldKind::Priority));
    finish_session(app, Feedback::Blink(target));
    Ok(())
}
