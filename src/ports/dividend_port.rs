//! Market data port trait for dividend histories.

use crate::domain::dividend::DividendSeries;
use crate::domain::error::DividendExtractorError;

pub trait DividendPort {
    /// Full dividend history for a market-qualified ticker (e.g. `MXRF11.SA`).
    ///
    /// `Ok(None)` means the security has no distribution history.
    fn fetch_dividends(&self, ticker: &str) -> Result<Option<DividendSeries>, DividendExtractorError>;
}
