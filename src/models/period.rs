//! Reporting period used to scope reconciliation queries.
//!
//! Supported textual forms:
//! - `all`
//! - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
//! - `YYYY:YYYY`, `YYYY-MM:YYYY-MM`, `YYYY-MM-DD:YYYY-MM-DD`

use crate::errors::{AppError, AppResult};
use crate::utils::date::{month_last_day, month_name};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    Year(i32),
    Month { year: i32, month: u32 },
    /// Inclusive on both ends.
    Range(NaiveDate, NaiveDate),
}

impl Period {
    pub fn parse(input: &str) -> AppResult<Self> {
        let r = input.trim();

        if r.is_empty() || r.eq_ignore_ascii_case("all") {
            return Ok(Period::All);
        }

        if let Some((start_raw, end_raw)) = r.split_once(':') {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.len() != end.len() {
                return Err(AppError::InvalidPeriod(format!(
                    "{r}: start and end must have the same format"
                )));
            }

            let (from, _) = Self::parse_single(start)?.bounds_or_err(r)?;
            let (_, to) = Self::parse_single(end)?.bounds_or_err(r)?;

            return Period::range(from, to);
        }

        Self::parse_single(r)
    }

    /// Build an inclusive range, rejecting an end before its start.
    pub fn range(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Period::Range(start, end))
    }

    pub fn month(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidPeriod(format!("{}-{:02}", year, month)));
        }
        Ok(Period::Month { year, month })
    }

    fn parse_single(r: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidPeriod(r.to_string());

        match r.len() {
            // YYYY
            4 => {
                let y: i32 = r.parse().map_err(|_| invalid())?;
                Ok(Period::Year(y))
            }
            // YYYY-MM
            7 => {
                let (y, m) = r.split_once('-').ok_or_else(invalid)?;
                let year: i32 = y.parse().map_err(|_| invalid())?;
                let month: u32 = m.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(Period::Month { year, month })
            }
            // YYYY-MM-DD
            10 => {
                let d = NaiveDate::parse_from_str(r, "%Y-%m-%d").map_err(|_| invalid())?;
                Ok(Period::Range(d, d))
            }
            _ => Err(invalid()),
        }
    }

    fn bounds_or_err(&self, raw: &str) -> AppResult<(NaiveDate, NaiveDate)> {
        self.bounds()
            .ok_or_else(|| AppError::InvalidPeriod(raw.to_string()))
    }

    /// First and last day covered, or `None` for `All`.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Period::All => None,
            Period::Year(y) => Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            )),
            Period::Month { year, month } => {
                let last = month_last_day(year, month)?;
                Some((
                    NaiveDate::from_ymd_opt(year, month, 1)?,
                    NaiveDate::from_ymd_opt(year, month, last)?,
                ))
            }
            Period::Range(start, end) => Some((start, end)),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            None => true,
            Some((start, end)) => start <= date && date <= end,
        }
    }

    /// Human readable title used by reports and exports.
    pub fn label(&self) -> String {
        match *self {
            Period::All => "All sessions".to_string(),
            Period::Year(y) => format!("Year {}", y),
            Period::Month { year, month } => format!("{} {}", month_name(month), year),
            Period::Range(start, end) if start == end => format!("{}", start.format("%d/%m/%Y")),
            Period::Range(start, end) => format!(
                "{} to {}",
                start.format("%d/%m/%Y"),
                end.format("%d/%m/%Y")
            ),
        }
    }
}
