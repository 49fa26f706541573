//! CSV portfolio adapter.
//!
//! Reads the holdings sheet exported as CSV. The ticker and share columns are found by header
//! name; a sheet with neither header is read with the ticker in the first column and the
//! share count in the fifth. Finding only one of the two headers is an error.

use crate::domain::dividend::Holding;
use crate::domain::error::DividendExtractorError;
use crate::ports::portfolio_port::PortfolioPort;
use log::debug;
use std::path::PathBuf;

pub const DEFAULT_TICKER_COLUMN: &str = "Ticker";
pub const DEFAULT_SHARES_COLUMN: &str = "Shares";

const FALLBACK_TICKER_INDEX: usize = 0;
const FALLBACK_SHARES_INDEX: usize = 4;

pub struct CsvPortfolioAdapter {
    path: PathBuf,
    ticker_column: String,
    shares_column: String,
}

impl CsvPortfolioAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ticker_column: DEFAULT_TICKER_COLUMN.to_string(),
            shares_column: DEFAULT_SHARES_COLUMN.to_string(),
        }
    }

    pub fn with_columns(mut self, ticker_column: &str, shares_column: &str) -> Self {
        self.ticker_column = ticker_column.to_string();
        self.shares_column = shares_column.to_string();
        self
    }

    fn error(&self, reason: impl std::fmt::Display) -> DividendExtractorError {
        DividendExtractorError::Portfolio {
            reason: format!("{}: {}", self.path.display(), reason),
        }
    }

    fn column_indexes(
        &self,
        headers: &csv::StringRecord,
    ) -> Result<(usize, usize), DividendExtractorError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
        };

        match (find(&self.ticker_column), find(&self.shares_column)) {
            (Some(ticker), Some(shares)) => Ok((ticker, shares)),
            (None, None) => {
                debug!(
                    "{}: no {:?}/{:?} headers, using columns {} and {}",
                    self.path.display(),
                    self.ticker_column,
                    self.shares_column,
                    FALLBACK_TICKER_INDEX + 1,
                    FALLBACK_SHARES_INDEX + 1
                );
                Ok((FALLBACK_TICKER_INDEX, FALLBACK_SHARES_INDEX))
            }
            (Some(_), None) => Err(self.error(format!("no {:?} column", self.shares_column))),
            (None, Some(_)) => Err(self.error(format!("no {:?} column", self.ticker_column))),
        }
    }
}

impl PortfolioPort for CsvPortfolioAdapter {
    fn load_holdings(&self) -> Result<Vec<Holding>, DividendExtractorError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| self.error(e))?;

        let headers = rdr.headers().map_err(|e| self.error(e))?.clone();
        let (ticker_index, shares_index) = self.column_indexes(&headers)?;

        let mut holdings = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            // Data starts on line 2, after the header.
            let line = i + 2;
            let record = result.map_err(|e| self.error(e))?;

            let ticker = record.get(ticker_index).unwrap_or_default();
            if ticker.is_empty() {
                debug!("{}: line {} has no ticker, skipping", self.path.display(), line);
                continue;
            }

            let shares_str = record.get(shares_index).ok_or_else(|| {
                self.error(format!(
                    "line {line}: no share count for {ticker} in column {}",
                    shares_index + 1
                ))
            })?;
            let shares = if shares_str.is_empty() {
                0
            } else {
                shares_str.parse::<i64>().map_err(|_| {
                    self.error(format!(
                        "line {line}: invalid share count {shares_str:?} for {ticker}"
                    ))
                })?
            };

            holdings.push(Holding::new(ticker.to_uppercase(), shares));
        }

        Ok(holdings)
    }
}
