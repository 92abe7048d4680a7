use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::dates::{due_seed, format_iso_date, step_days};
use crate::tui::app::{App, DueSession, Mode};
use crate::tui::detail::DetailFieldKind;

use super::*;

pub(super) fn begin_due(app: &mut App, id: u32, due: &str) {
    app.begin(Mode::Due(DueSession {
        id,
        date: due_seed(due),
    }));
}

/// h/l step a day, k/j a week
pub(super) fn handle_due(app: &mut App, key: KeyEvent) {
    let Mode::Due(session) = &mut app.mode else {
        return;
    };
    let days = match key.code {
        KeyCode::Left | KeyCode::Char('h') => -1,
        KeyCode::Right | KeyCode::Char('l') => 1,
        KeyCode::Up | KeyCode::Char('k') => -7,
        KeyCode::Down | KeyCode::Char('j') => 7,
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.update_table_height();
            return;
        }
        KeyCode::Enter => {
            let DueSession { id, date } = *session;
            if let Err(e) = commit_due(app, id, &format_iso_date(date)) {
                tracing::warn!(id, err = %e, "due date rejected");
                app.flash_error(&e);
            }
            return;
        }
        _ => return,
    };
    session.date = step_days(session.date, days);
}

fn commit_due(app: &mut App, id: u32, date: &str) -> Result<(), EditError> {
    app.store_mut().set_due_date(id, date)?;
    tracing::info!(id, date, "due date set");
    app.reload()?;
    app.mode = Mode::Navigate;
    let target = app.edit_feedback(id, Some(DetailFieldKind::Due));
    finish_session(app, Feedback::Blink(target));
    Ok(())
}
