//! Extraction pipeline: holdings in, sorted dividend records out.

use log::{debug, info, warn};

use crate::domain::aggregator::{aggregate, sort_records};
use crate::domain::dividend::DividendRecord;
use crate::domain::error::DividendExtractorError;
use crate::domain::period::Period;
use crate::ports::dividend_port::DividendPort;
use crate::ports::portfolio_port::PortfolioPort;

/// São Paulo stock exchange suffix used by the market data provider.
pub const DEFAULT_MARKET_SUFFIX: &str = ".SA";

#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    pub market_suffix: String,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            market_suffix: DEFAULT_MARKET_SUFFIX.to_string(),
        }
    }
}

impl ExtractionOptions {
    pub fn qualify(&self, ticker: &str) -> String {
        format!("{}{}", ticker, self.market_suffix)
    }
}

#[derive(Debug, Clone)]
pub struct Extraction {
    /// Sorted by distribution date.
    pub records: Vec<DividendRecord>,
    pub skipped: Vec<SkippedHolding>,
}

impl Extraction {
    pub fn total_income(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedHolding {
    pub ticker: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoShares,
    NoDividends,
    FetchFailed(String),
    NothingInPeriod,
}

/// Runs every holding through fetch and aggregation, one at a time.
///
/// Only a failure to load the portfolio is returned as an error. A fetch error for one ticker is
/// logged and that holding is skipped.
pub fn extract_dividends(
    portfolio: &dyn PortfolioPort,
    dividends: &dyn DividendPort,
    period: &Period,
    options: &ExtractionOptions,
) -> Result<Extraction, DividendExtractorError> {
    let holdings = portfolio.load_holdings()?;
    info!("Processing {} holdings for {}...", holdings.len(), period);

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for holding in holdings {
        let mut skip = |reason| {
            skipped.push(SkippedHolding {
                ticker: holding.ticker.clone(),
                reason,
            })
        };

        if holding.shares <= 0 {
            debug!("{}: no shares held, skipping", holding.ticker);
            skip(SkipReason::NoShares);
            continue;
        }

        let qualified = options.qualify(&holding.ticker);
        let series = match dividends.fetch_dividends(&qualified) {
            Ok(Some(series)) => series,
            Ok(None) => {
                info!("{}: no dividend history", qualified);
                skip(SkipReason::NoDividends);
                continue;
            }
            Err(e) => {
                warn!("{}: {}", qualified, e);
                skip(SkipReason::FetchFailed(e.to_string()));
                continue;
            }
        };

        match aggregate(&holding.ticker, &series, period, holding.shares) {
            Some(record) => {
                debug!(
                    "{}: {} on {} for {} shares",
                    record.ticker, record.amount, record.date, record.shares
                );
                records.push(record);
            }
            None => {
                info!("{}: no dividends paid in {}", qualified, period);
                skip(SkipReason::NothingInPeriod);
            }
        }
    }

    let records = sort_records(records);
    info!(
        "{} of {} processed holdings paid dividends in {}",
        records.len(),
        records.len() + skipped.len(),
        period
    );

    Ok(Extraction { records, skipped })
}
