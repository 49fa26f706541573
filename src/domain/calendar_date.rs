//! Validated calendar dates in `DD/MM/YYYY` form.
//!
//! [`CalendarDate`] values only come out of this module: [`parse_date`] for user input,
//! [`from_ymd`] for numeric components and `From<NaiveDate>` for adapters that already hold
//! a chrono date.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::domain::error::DateError;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Field order matters: the derived `Ord` compares year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Gregorian rule: divisible by 4, and not by 100 unless also by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`, or `None` for an out-of-range month.
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    if month == 2 && is_leap_year(year) {
        return Some(29);
    }
    Some(DAYS_IN_MONTH[(month - 1) as usize])
}

/// Builds a date from numeric components, applying the same checks as [`parse_date`].
pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<CalendarDate, DateError> {
    let days = days_in_month(month, year).ok_or(DateError::InvalidMonth { month })?;

    if !(1..=days).contains(&day) {
        return Err(DateError::InvalidDay {
            day,
            month,
            days_in_month: days,
        });
    }

    Ok(CalendarDate { year, month, day })
}

/// Parses a strictly numeric `DD/MM/YYYY` string.
///
/// ```
/// use dividend_extractor::domain::calendar_date::parse_date;
///
/// let date = parse_date("01/03/2025").unwrap();
/// assert_eq!((date.day(), date.month(), date.year()), (1, 3, 2025));
/// ```
pub fn parse_date(input: &str) -> Result<CalendarDate, DateError> {
    let format_error = || DateError::Format {
        input: input.to_string(),
    };

    let fields: Vec<&str> = input.trim().split('/').collect();
    let [day, month, year] = fields.as_slice() else {
        return Err(format_error());
    };

    let day = parse_field::<u32>(day).ok_or_else(format_error)?;
    let month = parse_field::<u32>(month).ok_or_else(format_error)?;
    let year = parse_field::<i32>(year).ok_or_else(format_error)?;

    from_ymd(year, month, day)
}

fn parse_field<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
