use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Parse a store date. Accepts the compact export form `20250114T093000Z`,
/// a plain ISO date, or an ISO datetime.
pub fn parse_task_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    None
}

/// ISO-8601 calendar date, as handed to `SetDueDate`
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Seed for the due-date stepper: the stored due date, or today when absent
/// or unparsable.
pub fn due_seed(due: &str) -> NaiveDate {
    parse_task_date(due).unwrap_or_else(today)
}

pub fn step_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// Relative age in compact form (`3d`, `2w`), for the table
pub fn age_label(entry: &str, now: NaiveDate) -> String {
    let Some(date) = parse_task_date(entry) else {
        return String::new();
    };
    let days = (now - date).num_days().max(0);
    match days {
        0..=13 => format!("{}d", days),
        14..=89 => format!("{}w", days / 7),
        90..=729 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}
