//! Rendering of dividend records into report rows.

use crate::domain::calendar_date::CalendarDate;
use crate::domain::dividend::DividendRecord;

pub const REPORT_HEADER: [&str; 4] = ["Date", "Ticker", "Dividend", "Shares"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `DD/MM/YYYY`
    #[default]
    DayMonthYear,
    /// `YYYY-MM-DD`
    Iso,
}

impl DateStyle {
    /// Style named by the `[report] date_style` setting: `dmy` or `iso`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dmy" => Some(Self::DayMonthYear),
            "iso" => Some(Self::Iso),
            _ => None,
        }
    }
}

pub fn format_date(date: &CalendarDate, style: DateStyle) -> String {
    match style {
        DateStyle::DayMonthYear => date.to_string(),
        DateStyle::Iso => format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
    }
}

/// One report row, in [`REPORT_HEADER`] column order.
pub fn format_record(record: &DividendRecord, style: DateStyle) -> [String; 4] {
    [
        format_date(&record.date, style),
        record.ticker.clone(),
        record.amount.to_string(),
        record.shares.to_string(),
    ]
}
