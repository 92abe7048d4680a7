use super::dates::{format_iso_date, parse_task_date};
use super::validate::{ValidationError, validate_priority, validate_recurrence, validate_tag_name};

/// Attributes extracted from a raw `add` line such as
/// `Buy milk project:home +errand due:2025-01-14 priority:H`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub description: String,
    pub project: String,
    pub priority: String,
    pub tags: Vec<String>,
    pub due: String,
    pub recur: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddLineError {
    #[error("missing description")]
    MissingDescription,
    #[error("unrecognized date: {0}")]
    BadDate(String),
    #[error("recurring task needs a due date")]
    RecurWithoutDue,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Split modifiers (`key:value`, `+tag`) from the free-text description.
pub fn parse_add_line(line: &str) -> Result<ParsedLine, AddLineError> {
    let mut parsed = ParsedLine::default();
    let mut words = Vec::new();

    for word in line.split_whitespace() {
        if let Some(tag) = word.strip_prefix('+')
            && !tag.is_empty()
        {
            validate_tag_name(tag)?;
            parsed.tags.push(tag.to_string());
            continue;
        }
        match word.split_once(':') {
            Some(("project" | "pro" | "proj", v)) => parsed.project = v.to_string(),
            Some(("priority" | "pri", v)) => {
                let v = v.to_ascii_uppercase();
                validate_priority(&v)?;
                parsed.priority = v;
            }
            Some(("due", v)) => {
                let date = parse_task_date(v).ok_or_else(|| AddLineError::BadDate(v.to_string()))?;
                parsed.due = format_iso_date(date);
            }
            Some(("recur", v)) => {
                validate_recurrence(v)?;
                parsed.recur = v.to_string();
            }
            _ => words.push(word),
        }
    }

    parsed.description = words.join(" ");
    if parsed.description.is_empty() {
        return Err(AddLineError::MissingDescription);
    }
    if !parsed.recur.is_empty() && parsed.due.is_empty() {
        return Err(AddLineError::RecurWithoutDue);
    }
    Ok(parsed)
}
