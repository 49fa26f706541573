//! Configuration validation.
//!
//! Checks the config file before any portfolio, network or report access. `[period]` is
//! validated when the period is resolved, after command line bounds are applied.

use crate::domain::error::DividendExtractorError;
use crate::domain::report_format::DateStyle;
use crate::ports::config_port::ConfigPort;

pub const SOURCE_CSV: &str = "csv";
pub const SOURCE_YAHOO: &str = "yahoo";

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), DividendExtractorError> {
    validate_dividend_source(config)?;
    validate_timeout(config)?;
    validate_date_style(config)?;
    Ok(())
}

fn validate_dividend_source(config: &dyn ConfigPort) -> Result<(), DividendExtractorError> {
    let source = config.get_string_or("dividends", "source", SOURCE_YAHOO);
    match source.to_lowercase().as_str() {
        SOURCE_CSV => match config.get_string("dividends", "path") {
            Some(s) if !s.trim().is_empty() => Ok(()),
            _ => Err(DividendExtractorError::ConfigMissing {
                section: "dividends".to_string(),
                key: "path".to_string(),
            }),
        },
        SOURCE_YAHOO => Ok(()),
        other => Err(DividendExtractorError::ConfigInvalid {
            section: "dividends".to_string(),
            key: "source".to_string(),
            reason: format!("unknown source {other:?}, expected csv or yahoo"),
        }),
    }
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), DividendExtractorError> {
    let value = config.get_int("dividends", "timeout_secs", 30);
    if value <= 0 {
        return Err(DividendExtractorError::ConfigInvalid {
            section: "dividends".to_string(),
            key: "timeout_secs".to_string(),
            reason: "timeout_secs must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_date_style(config: &dyn ConfigPort) -> Result<(), DividendExtractorError> {
    match config.get_string("report", "date_style") {
        Some(name) if DateStyle::from_name(&name).is_none() => {
            Err(DividendExtractorError::ConfigInvalid {
                section: "report".to_string(),
                key: "date_style".to_string(),
                reason: format!("unknown date style {:?}, expected dmy or iso", name.trim()),
            })
        }
        _ => Ok(()),
    }
}
