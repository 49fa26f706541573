//! Portfolio holdings port trait.

use crate::domain::dividend::Holding;
use crate::domain::error::DividendExtractorError;

pub trait PortfolioPort {
    /// Every holding in the portfolio, in source order. The end of the returned list is the end
    /// of the portfolio; share counts are not filtered here.
    fn load_holdings(&self) -> Result<Vec<Holding>, DividendExtractorError>;
}
