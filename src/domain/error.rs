//! Domain error types.

use crate::domain::calendar_date::CalendarDate;

/// Failure to turn a `DD/MM/YYYY` string into a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("invalid date {input:?}: expected DD/MM/YYYY")]
    Format { input: String },

    #[error("invalid month {month}: it must be between 1 and 12")]
    InvalidMonth { month: u32 },

    #[error("invalid day {day} for month {month}: this month has {days_in_month} days")]
    InvalidDay {
        day: u32,
        month: u32,
        days_in_month: u32,
    },
}

/// Top-level error type for dividend-extractor.
#[derive(Debug, thiserror::Error)]
pub enum DividendExtractorError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error("invalid period: start {start} is after end {end}")]
    InvalidPeriod { start: CalendarDate, end: CalendarDate },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("portfolio error: {reason}")]
    Portfolio { reason: String },

    #[error("failed to get dividends for {ticker}: {reason}")]
    Fetch { ticker: String, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DividendExtractorError> for std::process::ExitCode {
    fn from(err: &DividendExtractorError) -> Self {
        let code: u8 = match err {
            DividendExtractorError::Io(_) | DividendExtractorError::Report { .. } => 1,
            DividendExtractorError::ConfigParse { .. }
            | DividendExtractorError::ConfigMissing { .. }
            | DividendExtractorError::ConfigInvalid { .. } => 2,
            DividendExtractorError::Date(_) | DividendExtractorError::InvalidPeriod { .. } => 3,
            DividendExtractorError::Portfolio { .. } => 4,
            DividendExtractorError::Fetch { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
