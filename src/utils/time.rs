//! Time utilities: parsing HH:MM and the appointment slot grid.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Bookable start times: from `start_hour:00` up to (excluding)
/// `end_hour:00`, every `step_minutes`.
pub fn slot_grid(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<NaiveTime> {
    let step = step_minutes.max(1);
    let mut out = Vec::new();
    let mut minutes = start_hour * 60;

    while minutes < end_hour.min(24) * 60 {
        if let Some(t) = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0) {
            out.push(t);
        }
        minutes += step;
    }
    out
}

pub fn is_on_grid(t: NaiveTime, start_hour: u32, end_hour: u32, step_minutes: u32) -> bool {
    let minutes = t.hour() * 60 + t.minute();
    let step = step_minutes.max(1);
    t.second() == 0
        && minutes >= start_hour * 60
        && minutes < end_hour.min(24) * 60
        && (minutes - start_hour * 60) % step == 0
}
