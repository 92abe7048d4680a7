use crate::ops::tags::parse_tag_edit;
use crate::ops::validate::{validate_description, validate_recurrence};
use crate::tui::app::App;
use crate::tui::detail::DetailFieldKind;

use super::*;

pub(super) fn commit_annotation(
    app: &mut App,
    id: u32,
    replace: bool,
    text: &str,
) -> Result<Feedback, EditError> {
    if replace {
        app.store_mut().replace_annotations(id, text)?;
    } else {
        if text.trim().is_empty() {
            return Err(EditError::EmptyAnnotation);
        }
        app.store_mut().annotate(id, text)?;
    }
    tracing::info!(id, replace, "annotated");
    app.reload()?;
    Ok(Feedback::Blink(app.edit_feedback(id, None)))
}

pub(super) fn commit_description(
    app: &mut App,
    id: u32,
    text: &str,
) -> Result<Feedback, EditError> {
    validate_description(text)?;
    app.store_mut().set_description(id, text)?;
    tracing::info!(id, "description set");
    app.reload()?;
    Ok(Feedback::Blink(
        app.edit_feedback(id, Some(DetailFieldKind::Description)),
    ))
}

/// `+tag`/bare adds, `-tag` removes; adds go to the store first
pub(super) fn commit_tags(app: &mut App, id: u32, text: &str) -> Result<Feedback, EditError> {
    let edit = parse_tag_edit(text)?;
    if !edit.adds.is_empty() {
        app.store_mut().add_tags(id, &edit.adds)?;
    }
    if !edit.removes.is_empty() {
        app.store_mut().remove_tags(id, &edit.removes)?;
    }
    tracing::info!(id, adds = ?edit.adds, removes = ?edit.removes, "tags edited");
    app.reload()?;
    Ok(Feedback::Blink(app.edit_feedback(id, Some(DetailFieldKind::Tags))))
}

pub(super) fn commit_recurrence(
    app: &mut App,
    id: u32,
    text: &str,
) -> Result<Feedback, EditError> {
    let spec = text.trim();
    validate_recurrence(spec)?;
    app.store_mut().set_recurrence(id, spec)?;
    tracing::info!(id, spec, "recurrence set");
    app.reload()?;
    Ok(Feedback::Blink(
        app.edit_feedback(id, Some(DetailFieldKind::Recurrence)),
    ))
}

/// The reload happens when the session exits
pub(super) fn commit_project(app: &mut App, id: u32, text: &str) -> Result<Feedback, EditError> {
    let project = text.trim();
    app.store_mut().set_project(id, project)?;
    tracing::info!(id, project, "project set");
    Ok(Feedback::Blink(
        app.edit_feedback(id, Some(DetailFieldKind::Project)),
    ))
}

/// Replace the filter list with the buffer's tokens. Empty clears it.
pub(super) fn commit_filter(app: &mut App, text: &str) -> Result<Feedback, EditError> {
    let previous = std::mem::replace(
        &mut app.filters,
        text.split_whitespace().map(str::to_string).collect(),
    );
    if let Err(e) = app.reload() {
        app.filters = previous;
        return Err(e.into());
    }
    tracing::info!(filters = ?app.filters, "filter set");
    app.table.set_cursor(0);
    Ok(Feedback::None)
}

/// Hand the line to the store, then find the task that appeared
pub(super) fn commit_add_task(app: &mut App, text: &str) -> Result<Feedback, EditError> {
    let before = app.task_ids();
    app.store_mut().add_line(text)?;
    app.reload()?;
    let added = app
        .tasks
        .iter()
        .enumerate()
        .find(|(_, t)| !before.contains(&t.id))
        .map(|(row, t)| (row, t.id));
    match added {
        Some((row, id)) => {
            tracing::info!(id, "task added");
            Ok(Feedback::NewTask { id, row })
        }
        // Added, but the current filter hides it
        None => Ok(Feedback::None),
    }
}
