// =============================================================================
// Market data service — remote passthrough with mock fallback
// =============================================================================
//
// The dashboard talks to this service for every data need: companies,
// historical series, quotes, predictions.  When a remote backend base URL is
// configured the service proxies to it; otherwise it serves from the mock
// generator.  Quotes degrade gracefully — a remote quote failure falls back
// to a mock quote instead of erroring, so the dashboard keeps rendering.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use crate::market_data::MockMarket;
use crate::types::{Company, HistoricalRecord, Prediction, Quote};

/// Timeout for remote quote lookups before falling back to mock data.
const QUOTE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct MarketDataService {
    mock: MockMarket,
    remote_base: Option<String>,
    http: reqwest::Client,
}

impl MarketDataService {
    pub fn new(mock: MockMarket, remote_base: Option<String>) -> Self {
        Self {
            mock,
            remote_base: remote_base.filter(|s| !s.trim().is_empty()),
            http: reqwest::Client::new(),
        }
    }

    /// Whether this service proxies to a remote backend.
    pub fn is_remote(&self) -> bool {
        self.remote_base.is_some()
    }

    pub async fn companies(&self) -> Result<Vec<Company>> {
        match &self.remote_base {
            Some(base) => self
                .get_json(&format!("{base}/api/companies"))
                .await
                .context("remote companies fetch failed"),
            None => Ok(self.mock.companies()),
        }
    }

    pub async fn historical(&self, ticker: &str) -> Result<Arc<Vec<HistoricalRecord>>> {
        match &self.remote_base {
            Some(base) => {
                let url = format!("{base}/api/historical?ticker={}", urlencode(ticker));
                let records: Vec<HistoricalRecord> = self
                    .get_json(&url)
                    .await
                    .with_context(|| format!("remote historical fetch failed for {ticker}"))?;
                Ok(Arc::new(records))
            }
            None => Ok(self.mock.historical(ticker)),
        }
    }

    /// Quote for `ticker`.  Remote errors and timeouts are logged and
    /// replaced with a mock quote.
    pub async fn quote(&self, ticker: &str) -> Quote {
        if let Some(base) = &self.remote_base {
            let url = format!("{base}/api/quote?ticker={}", urlencode(ticker));
            let attempt = async {
                let resp = self
                    .http
                    .get(&url)
                    .timeout(QUOTE_TIMEOUT)
                    .send()
                    .await?
                    .error_for_status()?;
                resp.json::<Quote>().await
            };
            match attempt.await {
                Ok(quote) => return quote,
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "remote quote failed, serving mock quote");
                }
            }
        }
        self.mock.quote(ticker)
    }

    pub async fn prediction(
        &self,
        ticker: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Prediction> {
        match &self.remote_base {
            Some(base) => {
                let url = format!(
                    "{base}/api/predict?ticker={}&year={year}&month={month}&day={day}",
                    urlencode(ticker)
                );
                self.get_json(&url)
                    .await
                    .with_context(|| format!("remote prediction fetch failed for {ticker}"))
            }
            None => self.mock.prediction(ticker, year, month, day),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;
        resp.json::<T>()
            .await
            .with_context(|| format!("decoding response from {url}"))
    }
}

/// Minimal percent-encoding for ticker symbols in query strings.
fn urlencode(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
                vec![c]
            } else {
                format!("%{:02X}", c as u32).chars().collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MarketDataService {
        MarketDataService::new(MockMarket::new(1825, 7), None)
    }

    #[tokio::test]
    async fn mock_mode_serves_companies() {
        let svc = service();
        assert!(!svc.is_remote());
        let companies = svc.companies().await.unwrap();
        assert_eq!(companies.len(), 40);
    }

    #[tokio::test]
    async fn mock_mode_serves_cached_historical() {
        let svc = service();
        let a = svc.historical("TCS").await.unwrap();
        let b = svc.historical("TCS").await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn mock_mode_quote_never_fails() {
        let quote = service().quote("RELIANCE").await;
        assert!(quote.current_price > 0.0);
    }

    #[test]
    fn blank_remote_base_counts_as_mock() {
        let svc = MarketDataService::new(MockMarket::new(30, 7), Some("  ".to_string()));
        assert!(!svc.is_remote());
    }

    #[test]
    fn urlencode_passes_plain_tickers() {
        assert_eq!(urlencode("RELIANCE"), "RELIANCE");
        assert_eq!(urlencode("BRK.B"), "BRK.B");
        assert_eq!(urlencode("A B&C"), "A%20B%26C");
    }
}
