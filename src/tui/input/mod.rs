mod detail;
mod due;
mod edit;
mod navigate;
mod priority;
mod search;
mod text;

use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::tags::TagEditError;
use crate::ops::validate::ValidationError;
use crate::store::StoreError;

use super::app::{App, AppEvent, Mode};
use super::blink::BlinkTarget;

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use detail::*;
#[allow(unused_imports)]
use due::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use priority::*;
#[allow(unused_imports)]
use search::*;
#[allow(unused_imports)]
use text::*;

/// Why a commit was refused. Shown as "Error: <message>" and the session
/// stays open.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("annotation cannot be empty")]
    EmptyAnnotation,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Tags(#[from] TagEditError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid regex: {}", pattern_error_summary(.0))]
    InvalidPattern(#[from] regex::Error),
}

/// The status row holds one line, but regex parse errors span several
/// (pattern, caret, message). Keep the message.
fn pattern_error_summary(err: &regex::Error) -> String {
    let text = err.to_string();
    let last = text
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .unwrap_or_default();
    last.strip_prefix("error: ").unwrap_or(last).to_string()
}

/// What to show once a commit succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Feedback {
    None,
    Blink(BlinkTarget),
    /// Put the cursor on the new task's description cell and blink it
    NewTask { id: u32, row: usize },
}

/// Handle a key event. Returns true when an edit session consumed it.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return false;
    }

    if handle_editing_modes(app, key) {
        return true;
    }

    if app.show_help {
        handle_help(app, key);
    } else if app.detail().is_some() {
        handle_detail(app, key);
    } else {
        handle_navigate(app, key);
    }
    false
}

/// Route `key` to the open session, if any
pub fn handle_editing_modes(app: &mut App, key: KeyEvent) -> bool {
    match &app.mode {
        Mode::Navigate => return false,
        Mode::Text(_) => handle_text(app, key),
        Mode::Due(_) => handle_due(app, key),
        Mode::Priority(_) => handle_priority(app, key),
    }
    true
}

/// Handle a result delivered from outside the key path
pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::DescriptionEdited { id, result } => match result {
            Ok(text) => match commit_description(app, id, &text) {
                Ok(feedback) => finish_session(app, feedback),
                Err(e) => {
                    tracing::warn!(id, err = %e, "external description edit rejected");
                    app.flash_error(&e);
                }
            },
            Err(msg) => {
                tracing::error!(id, err = %msg, "external editor failed");
                app.flash(format!("Error: editor: {}", msg));
            }
        },
    }
}

/// Leave the current session and show the commit's result
pub(super) fn finish_session(app: &mut App, feedback: Feedback) {
    app.update_table_height();
    match feedback {
        Feedback::None => {}
        Feedback::Blink(target) => app.start_blink(target),
        Feedback::NewTask { id, row } => {
            app.move_cursor(row, crate::tui::table::DESCRIPTION_COLUMN);
            app.start_blink(BlinkTarget::Row(id));
        }
    }
}
