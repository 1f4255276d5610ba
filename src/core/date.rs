//! Calendar date helpers for the exchange's publication calendar

use super::error::LookupError;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Date layout used in the exchange's URLs and tables, e.g. `2024.01.05.`
pub const DATE_FORMAT: &str = "%Y.%m.%d.";

pub fn render(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse(text: &str) -> Result<NaiveDate, LookupError> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| LookupError::InvalidDate(text.to_string()))
}

/// Rolls a weekend date back to the Friday before it. Weekdays are returned as is.
///
/// `None` when the Friday falls before the earliest representable date.
pub fn last_business_day(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_sub_days(Days::new(1)),
        Weekday::Sun => date.checked_sub_days(Days::new(2)),
        _ => Some(date),
    }
}

pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}
