use crate::model::Task;

/// True when `task` satisfies every filter token.
///
/// Tokens: `+tag`, `-tag`, `project:name` (prefix match), `priority:H`,
/// `status:pending`, anything else is a case-insensitive description
/// substring. Without a `status:` token only pending tasks are shown.
pub fn matches_filters(task: &Task, filters: &[String]) -> bool {
    let mut status_given = false;
    for token in filters {
        let ok = if let Some(tag) = token.strip_prefix('+').filter(|t| !t.is_empty()) {
            task.has_tag(tag)
        } else if let Some(tag) = token.strip_prefix('-').filter(|t| !t.is_empty()) {
            !task.has_tag(tag)
        } else {
            match token.split_once(':') {
                Some(("project" | "pro" | "proj", v)) => task.project.starts_with(v),
                Some(("priority" | "pri", v)) => task.priority.eq_ignore_ascii_case(v),
                Some(("status", v)) => {
                    status_given = true;
                    task.status == v
                }
                _ => task
                    .description
                    .to_lowercase()
                    .contains(&token.to_lowercase()),
            }
        };
        if !ok {
            return false;
        }
    }
    status_given || task.status == "pending"
}
