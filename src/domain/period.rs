//! Inclusive reporting period.

use std::fmt;

use crate::domain::calendar_date::{parse_date, CalendarDate};
use crate::domain::error::DividendExtractorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: CalendarDate,
    end: CalendarDate,
}

impl Period {
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, DividendExtractorError> {
        if start > end {
            return Err(DividendExtractorError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> CalendarDate {
        self.start
    }

    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.start <= *date && *date <= self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Builds the period from two `DD/MM/YYYY` strings. Either bound failing fails the whole build.
pub fn build_period(start: &str, end: &str) -> Result<Period, DividendExtractorError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    Period::new(start, end)
}
