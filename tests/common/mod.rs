#![allow(dead_code)]

use dividend_extractor::domain::calendar_date::{from_ymd, CalendarDate};
use dividend_extractor::domain::dividend::{DividendSeries, Holding};
use dividend_extractor::domain::error::DividendExtractorError;
use dividend_extractor::ports::dividend_port::DividendPort;
use dividend_extractor::ports::portfolio_port::PortfolioPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockPortfolioPort {
    pub holdings: Vec<Holding>,
    pub error: Option<String>,
}

impl MockPortfolioPort {
    pub fn new(holdings: &[(&str, i64)]) -> Self {
        Self {
            holdings: holdings
                .iter()
                .map(|(ticker, shares)| Holding::new(*ticker, *shares))
                .collect(),
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            holdings: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl PortfolioPort for MockPortfolioPort {
    fn load_holdings(&self) -> Result<Vec<Holding>, DividendExtractorError> {
        if let Some(reason) = &self.error {
            return Err(DividendExtractorError::Portfolio {
                reason: reason.clone(),
            });
        }
        Ok(self.holdings.clone())
    }
}

/// Serves canned series keyed by market-qualified ticker and records every request.
pub struct MockDividendPort {
    pub data: HashMap<String, DividendSeries>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl MockDividendPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_series(mut self, ticker: &str, entries: &[(CalendarDate, f64)]) -> Self {
        self.data
            .insert(ticker.to_string(), entries.iter().copied().collect());
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl DividendPort for MockDividendPort {
    fn fetch_dividends(&self, ticker: &str) -> Result<Option<DividendSeries>, DividendExtractorError> {
        self.requests.borrow_mut().push(ticker.to_string());

        if let Some(reason) = self.errors.get(ticker) {
            return Err(DividendExtractorError::Fetch {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    from_ymd(y, m, d).unwrap()
}
