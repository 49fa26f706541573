//! Holdings, dividend series and per-security distribution records.

use std::collections::BTreeMap;

use crate::domain::calendar_date::CalendarDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holding {
    pub ticker: String,
    pub shares: i64,
}

impl Holding {
    pub fn new(ticker: impl Into<String>, shares: i64) -> Self {
        Self {
            ticker: ticker.into(),
            shares,
        }
    }
}

/// Per-unit dividend amounts keyed by payment date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DividendSeries {
    payments: BTreeMap<CalendarDate, f64>,
}

impl DividendSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two payments reported for the same date are summed into one entry.
    pub fn insert(&mut self, date: CalendarDate, amount: f64) {
        *self.payments.entry(date).or_insert(0.0) += amount;
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CalendarDate, &f64)> {
        self.payments.iter()
    }
}

impl FromIterator<(CalendarDate, f64)> for DividendSeries {
    fn from_iter<I: IntoIterator<Item = (CalendarDate, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (date, amount) in iter {
            series.insert(date, amount);
        }
        series
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividendRecord {
    /// Earliest payment date inside the period.
    pub date: CalendarDate,
    pub ticker: String,
    /// Total income for the position: per-unit sum times `shares`.
    pub amount: f64,
    pub shares: i64,
}
