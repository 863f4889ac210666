//! Parsing of free-text console input before it reaches the service.

use crate::menu::MenuOption;
use chrono::{NaiveDate, NaiveDateTime};
use todo_list::TaskId;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn parse_selection(text: &str) -> Option<MenuOption> {
    text.trim()
        .parse::<u8>()
        .ok()
        .and_then(|n| MenuOption::try_from(n).ok())
}

/// Parses `YYYY-MM-DD` (taken as midnight) or a date followed by a time of day.
pub fn parse_due_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

pub fn parse_task_id(text: &str) -> Option<TaskId> {
    text.parse().ok()
}
