use std::sync::LazyLock;

use regex::Regex;

use crate::model::PRIORITY_OPTIONS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("description cannot be empty")]
    EmptyDescription,
    #[error("description contains non-printable characters")]
    NonPrintableDescription,
    #[error("{0}")]
    InvalidTag(&'static str),
    #[error("invalid recurrence: {0}")]
    InvalidRecurrence(String),
    #[error("invalid priority: {0:?}")]
    InvalidPriority(String),
}

/// Named periods the store understands for `recur:`
const NAMED_RECURRENCES: &[&str] = &[
    "daily",
    "day",
    "weekdays",
    "weekly",
    "week",
    "biweekly",
    "fortnight",
    "monthly",
    "month",
    "bimonthly",
    "quarterly",
    "semiannual",
    "biannual",
    "biyearly",
    "annual",
    "yearly",
    "year",
];

static RECUR_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*(min|h|d|w|wk|wks|mo|m|q|y|yr|days?|weeks?|months?|quarters?|years?)$")
        .expect("static recurrence pattern")
});

/// Descriptions must be non-blank and free of control characters.
pub fn validate_description(desc: &str) -> Result<(), ValidationError> {
    if desc.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if desc.chars().any(char::is_control) {
        return Err(ValidationError::NonPrintableDescription);
    }
    Ok(())
}

/// Tag names are single words; a leading sign would be read as an add/remove
/// marker and a colon as an attribute modifier.
pub fn validate_tag_name(tag: &str) -> Result<(), ValidationError> {
    if tag.is_empty() {
        return Err(ValidationError::InvalidTag("tag name cannot be empty"));
    }
    if tag.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidTag("tag name cannot contain spaces"));
    }
    if tag.starts_with('+') || tag.starts_with('-') {
        return Err(ValidationError::InvalidTag("tag name cannot start with + or -"));
    }
    if tag.contains(':') {
        return Err(ValidationError::InvalidTag("tag name cannot contain ':'"));
    }
    if tag.chars().any(char::is_control) {
        return Err(ValidationError::InvalidTag(
            "tag name contains non-printable characters",
        ));
    }
    Ok(())
}

/// Accepts named periods (`weekly`) and counted durations (`2w`, `3 days`).
/// Empty clears recurrence and is allowed.
pub fn validate_recurrence(spec: &str) -> Result<(), ValidationError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Ok(());
    }
    let lower = spec.to_ascii_lowercase();
    if NAMED_RECURRENCES.contains(&lower.as_str()) {
        return Ok(());
    }
    if let Some(caps) = RECUR_DURATION.captures(&lower)
        && caps[1].parse::<u32>().is_ok_and(|n| n > 0)
    {
        return Ok(());
    }
    Err(ValidationError::InvalidRecurrence(spec.to_string()))
}

pub fn validate_priority(priority: &str) -> Result<(), ValidationError> {
    if PRIORITY_OPTIONS.contains(&priority) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPriority(priority.to_string()))
    }
}
