//! Session dates and start times as native spreadsheet values.

use chrono::{NaiveDate, NaiveTime, Timelike};

pub(crate) const DATE_FORMAT: &str = "dd/mm/yyyy";
pub(crate) const TIME_FORMAT: &str = "hh:mm";

/// Days since the spreadsheet epoch (1899-12-30).
fn date_serial(d: NaiveDate) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - epoch).num_days() as f64)
}

/// Fraction of a day.
fn time_serial(t: NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 / 86_400.0
}

/// A `YYYY-MM-DD` or `HH:MM` cell as (number format, serial value).
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date_serial(d).map(|v| (DATE_FORMAT, v));
    }

    NaiveTime::parse_from_str(s, "%H:%M")
        .ok()
        .map(|t| (TIME_FORMAT, time_serial(t)))
}
