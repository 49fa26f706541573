//! CSV file dividend adapter.
//!
//! One file per market-qualified ticker, `<dir>/<TICKER>.csv`, with a header row and
//! `date,dividend` columns.

use crate::domain::calendar_date::CalendarDate;
use crate::domain::dividend::DividendSeries;
use crate::domain::error::DividendExtractorError;
use crate::ports::dividend_port::DividendPort;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use std::path::PathBuf;

pub struct CsvDividendAdapter {
    base_path: PathBuf,
}

impl CsvDividendAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

/// Parses a payment timestamp and drops its timezone, keeping the local wall-clock date.
///
/// Accepts `2025-03-05`, `2025-03-05 00:00:00`, `2025-03-05 00:00:00-03:00` and RFC 3339.
pub fn parse_payment_date(value: &str) -> Option<CalendarDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.into());
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(date_time.date().into());
    }
    if let Ok(date_time) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(date_time.naive_local().date().into());
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.naive_local().date().into());
    }
    None
}

impl DividendPort for CsvDividendAdapter {
    fn fetch_dividends(&self, ticker: &str) -> Result<Option<DividendSeries>, DividendExtractorError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            debug!("{}: {} not found", ticker, path.display());
            return Ok(None);
        }

        let fetch_error = |reason: String| DividendExtractorError::Fetch {
            ticker: ticker.to_string(),
            reason,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| fetch_error(format!("failed to read {}: {}", path.display(), e)))?;

        let mut series = DividendSeries::new();

        for result in rdr.records() {
            let record = result.map_err(|e| fetch_error(format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(0)
                .ok_or_else(|| fetch_error("missing date column".into()))?;
            let date = parse_payment_date(date_str)
                .ok_or_else(|| fetch_error(format!("invalid date {:?}", date_str)))?;

            let amount: f64 = record
                .get(1)
                .ok_or_else(|| fetch_error("missing dividend column".into()))?
                .parse()
                .map_err(|e| fetch_error(format!("invalid dividend value: {}", e)))?;

            series.insert(date, amount);
        }

        if series.is_empty() {
            return Ok(None);
        }
        Ok(Some(series))
    }
}
