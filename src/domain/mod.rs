//! Core domain types and logic.

pub mod calendar_date;
pub mod period;
pub mod dividend;
pub mod aggregator;
pub mod pipeline;
pub mod report_format;
pub mod config_validation;
pub mod error;
