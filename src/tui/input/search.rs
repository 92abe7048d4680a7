use crate::tui::app::{App, TextKind};
use crate::tui::search::{SearchScope, SearchState};

use super::*;

pub(super) fn begin_search(app: &mut App, scope: SearchScope) {
    begin_text(app, TextKind::Search(scope), "");
}

fn state_mut(app: &mut App, scope: SearchScope) -> &mut SearchState {
    match scope {
        SearchScope::List => &mut app.search,
        SearchScope::Help => &mut app.help_search,
        SearchScope::Detail => &mut app.detail_search,
    }
}

/// Compile `pattern` and recompute hits for `scope`. An empty pattern
/// clears the search; a bad one leaves the previous search untouched.
pub(super) fn commit_search(
    app: &mut App,
    scope: SearchScope,
    pattern: &str,
) -> Result<Feedback, EditError> {
    if pattern.is_empty() {
        state_mut(app, scope).clear();
        return Ok(Feedback::None);
    }
    let re = app.regex_cache.get_or_compile(pattern)?;
    {
        let state = state_mut(app, scope);
        state.regex = Some(re);
        state.index = 0;
    }
    match scope {
        SearchScope::List => {
            app.search.match_cells(app.table.rows());
            jump_to_list_match(app);
        }
        SearchScope::Help => {
            app.help_search.match_lines(&app.help_lines);
            scroll_to_help_match(app);
        }
        SearchScope::Detail => refresh_detail_matches(app),
    }
    tracing::debug!(?scope, pattern, "search");
    Ok(Feedback::None)
}

/// Hits in the detail pane, one per slot whose value matches
pub(super) fn refresh_detail_matches(app: &mut App) {
    let lines: Vec<String> = match app.detail() {
        Some(ds) => ds.fields.iter().map(|f| f.kind.value(&ds.task)).collect(),
        None => Vec::new(),
    };
    app.detail_search.match_lines(&lines);
}

fn jump_to_list_match(app: &mut App) {
    if let Some((row, col)) = app.search.current() {
        app.move_cursor(row, col);
    }
}

fn scroll_to_help_match(app: &mut App) {
    if let Some((line, _)) = app.help_search.current() {
        app.help_scroll = line;
    }
}

/// `n`/`N` in the table
pub(super) fn step_list_search(app: &mut App, forward: bool) {
    let hit = if forward {
        app.search.next()
    } else {
        app.search.prev()
    };
    if hit.is_some() {
        jump_to_list_match(app);
    }
}

/// `n`/`N` in the help overlay
pub(super) fn step_help_search(app: &mut App, forward: bool) {
    let hit = if forward {
        app.help_search.next()
    } else {
        app.help_search.prev()
    };
    if hit.is_some() {
        scroll_to_help_match(app);
    }
}
