//! Money type for session prices and reconciliation totals.
//!
//! Amounts are stored as integer cents so that sums over many sessions are
//! exact. The database keeps the legacy REAL `valor` columns; conversion
//! happens once at the row boundary.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Convert a REAL column value (e.g. `valor`) to cents, rounding to the
    /// nearest cent.
    pub fn from_db(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Value written back to REAL columns.
    pub fn to_db(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse an amount typed by the operator.
    ///
    /// Accepts `150`, `150.5`, `150,50`, an optional leading `symbol`
    /// (`R$ 150,00`) and the grouped form printed by
    /// [`format_money`](crate::utils::format_money) (`R$ 1,234.50`).
    /// Thousands grouping is only recognised when both `,` and `.` appear:
    /// the last one is the decimal separator. A lone separator is always
    /// decimal, so `1.234` is rejected. Negative amounts are rejected.
    pub fn parse(input: &str, symbol: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidAmount(input.to_string());

        let mut s = input.trim();
        let symbol = symbol.trim();
        if !symbol.is_empty() {
            s = s.strip_prefix(symbol).unwrap_or(s).trim_start();
        }

        if !s.chars().any(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return Err(invalid());
        }

        let (int_part, frac_part) = match s.rfind(['.', ',']) {
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => (s, ""),
        };

        let grouping = match s[int_part.len()..].chars().next() {
            Some('.') => ',',
            _ => '.',
        };
        let int_digits = ungroup(int_part, grouping).ok_or_else(invalid)?;

        if frac_part.len() > 2 {
            return Err(invalid());
        }

        let units: i64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };

        let cents: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac_part.parse().map_err(|_| invalid())?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Self)
            .ok_or_else(invalid)
    }
}

/// Drop `sep` from `1,234,567`-style groups. `None` when the groups are
/// malformed or the other separator shows up again.
fn ungroup(int_part: &str, sep: char) -> Option<String> {
    if !int_part.contains(sep) {
        return int_part.chars().all(|c| c.is_ascii_digit()).then(|| int_part.to_string());
    }

    let groups: Vec<&str> = int_part.split(sep).collect();
    let (head, tail) = groups.split_first()?;
    let head_ok = (1..=3).contains(&head.len());
    let tail_ok = tail.iter().all(|g| g.len() == 3);
    let digits_ok = groups.iter().all(|g| g.chars().all(|c| c.is_ascii_digit()));

    (head_ok && tail_ok && digits_ok).then(|| groups.concat())
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
