//! Yahoo Finance dividend adapter.
//!
//! Uses the chart API with `events=div`, which returns every distribution since `period1`
//! keyed by UNIX timestamp.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::DateTime;
use log::{debug, trace};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::domain::dividend::DividendSeries;
use crate::domain::error::DividendExtractorError;
use crate::ports::dividend_port::DividendPort;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[derive(Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: Meta,
    events: Option<Events>,
}

#[derive(Deserialize)]
struct Meta {
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Deserialize)]
struct Events {
    #[serde(default)]
    dividends: HashMap<String, DividendEvent>,
}

#[derive(Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

pub struct YahooDividendAdapter {
    base_url: String,
    client: Client,
}

impl YahooDividendAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DividendExtractorError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DividendExtractorError::ConfigInvalid {
                section: "dividends".into(),
                key: "base_url".into(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn chart_url(&self, ticker: &str) -> Result<Url, DividendExtractorError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Url::parse_with_params(
            &format!("{}/v8/finance/chart/{}", self.base_url, ticker),
            &[
                ("period1", "0".to_string()),
                ("period2", now.to_string()),
                ("interval", "1d".to_string()),
                ("events", "div".to_string()),
            ],
        )
        .map_err(|e| DividendExtractorError::Fetch {
            ticker: ticker.to_string(),
            reason: format!("invalid URL: {e}"),
        })
    }
}

/// Decodes a chart API reply into the ticker's dividend series.
///
/// Timestamps are moved to exchange local time before the timezone is dropped, so a payment at
/// local midnight keeps its local date.
pub fn parse_chart(ticker: &str, body: &str) -> Result<Option<DividendSeries>, DividendExtractorError> {
    let fetch_error = |reason: String| DividendExtractorError::Fetch {
        ticker: ticker.to_string(),
        reason,
    };

    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| fetch_error(format!("got an unexpected response: {e}")))?;

    if let Some(error) = response.chart.error {
        if error.code == "Not Found" {
            return Ok(None);
        }
        return Err(fetch_error(format!(
            "{}: {}",
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(None);
    };
    let Some(events) = result.events else {
        return Ok(None);
    };

    let mut series = DividendSeries::new();
    for event in events.dividends.values() {
        let local = event
            .date
            .checked_add(result.meta.gmtoffset)
            .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
            .ok_or_else(|| fetch_error(format!("invalid timestamp {}", event.date)))?;
        series.insert(local.naive_utc().date().into(), event.amount);
    }

    if series.is_empty() {
        return Ok(None);
    }
    Ok(Some(series))
}

impl DividendPort for YahooDividendAdapter {
    fn fetch_dividends(&self, ticker: &str) -> Result<Option<DividendSeries>, DividendExtractorError> {
        let url = self.chart_url(ticker)?;
        let fetch_error = |reason: String| DividendExtractorError::Fetch {
            ticker: ticker.to_string(),
            reason,
        };

        trace!("Sending request to {}...", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| fetch_error(format!("request to {url} failed: {e}")))?;
        trace!("Got response from {}.", url);

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{}: unknown to the provider", ticker);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(fetch_error(format!("server returned an error: {status}")));
        }

        let body = response
            .text()
            .map_err(|e| fetch_error(format!("failed to read response: {e}")))?;
        parse_chart(ticker, &body)
    }
}
