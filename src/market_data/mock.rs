// =============================================================================
// Mock market data — deterministic per-ticker series with a memoized cache
// =============================================================================
//
// Stands in for the real data backend during development.  Five years of
// daily prices are generated as a clamped random walk, then down-sampled to
// weekly to cut chart noise.  Generation is seeded from the ticker symbol so
// a given ticker always replays the same series, and the first generated
// series per ticker is memoized in an explicit process-scoped map — the quote
// and prediction generators read the cached series so that every endpoint
// agrees on the last price.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{Duration, Local, NaiveDate, Utc};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::types::{Company, HistoricalRecord, Prediction, Quote};

/// The NSE large-caps the dashboard lists.
const COMPANY_TABLE: &[(&str, &str)] = &[
    ("RELIANCE", "Reliance Industries Limited"),
    ("TCS", "Tata Consultancy Services Limited"),
    ("HDFCBANK", "HDFC Bank Limited"),
    ("INFY", "Infosys Limited"),
    ("HINDUNILVR", "Hindustan Unilever Limited"),
    ("ICICIBANK", "ICICI Bank Limited"),
    ("KOTAKBANK", "Kotak Mahindra Bank Limited"),
    ("LT", "Larsen & Toubro Limited"),
    ("SBIN", "State Bank of India"),
    ("BHARTIARTL", "Bharti Airtel Limited"),
    ("ASIANPAINT", "Asian Paints Limited"),
    ("MARUTI", "Maruti Suzuki India Limited"),
    ("BAJFINANCE", "Bajaj Finance Limited"),
    ("HCLTECH", "HCL Technologies Limited"),
    ("AXISBANK", "Axis Bank Limited"),
    ("ITC", "ITC Limited"),
    ("WIPRO", "Wipro Limited"),
    ("ULTRACEMCO", "UltraTech Cement Limited"),
    ("NESTLEIND", "Nestlé India Limited"),
    ("TITAN", "Titan Company Limited"),
    ("ADANIPORTS", "Adani Ports and Special Economic Zone Limited"),
    ("POWERGRID", "Power Grid Corporation of India Limited"),
    ("NTPC", "NTPC Limited"),
    ("BAJAJFINSV", "Bajaj Finserv Limited"),
    ("DRREDDY", "Dr. Reddys Laboratories Limited"),
    ("SUNPHARMA", "Sun Pharmaceutical Industries Limited"),
    ("TECHM", "Tech Mahindra Limited"),
    ("ONGC", "Oil and Natural Gas Corporation Limited"),
    ("TATASTEEL", "Tata Steel Limited"),
    ("JSWSTEEL", "JSW Steel Limited"),
    ("HINDALCO", "Hindalco Industries Limited"),
    ("INDUSINDBK", "IndusInd Bank Limited"),
    ("CIPLA", "Cipla Limited"),
    ("GRASIM", "Grasim Industries Limited"),
    ("BRITANNIA", "Britannia Industries Limited"),
    ("COALINDIA", "Coal India Limited"),
    ("EICHERMOT", "Eicher Motors Limited"),
    ("BPCL", "Bharat Petroleum Corporation Limited"),
    ("HEROMOTOCO", "Hero MotoCorp Limited"),
    ("DIVISLAB", "Divis Laboratories Limited"),
];

/// Trading days per calendar year, used to scale the prediction horizon.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Mock market-data source with a lazily populated per-ticker cache.
pub struct MockMarket {
    /// Calendar days of daily history to generate before down-sampling.
    history_days: i64,
    /// Keep every `sample_step`-th daily record (7 => weekly samples).
    sample_step: usize,
    cache: RwLock<HashMap<String, Arc<Vec<HistoricalRecord>>>>,
}

impl MockMarket {
    pub fn new(history_days: i64, sample_step: usize) -> Self {
        Self {
            history_days,
            sample_step: sample_step.max(1),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The static company list.
    pub fn companies(&self) -> Vec<Company> {
        COMPANY_TABLE
            .iter()
            .map(|&(ticker, name)| Company {
                ticker: ticker.to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    /// Cached historical series for `ticker`, generating it on first access.
    pub fn historical(&self, ticker: &str) -> Arc<Vec<HistoricalRecord>> {
        if let Some(series) = self.cache.read().get(ticker) {
            return series.clone();
        }
        let series = Arc::new(self.generate_historical(ticker));
        debug!(ticker = %ticker, samples = series.len(), "generated mock historical series");
        self.cache
            .write()
            .entry(ticker.to_string())
            .or_insert(series)
            .clone()
    }

    /// Quote derived from the cached series: last price plus a small jitter
    /// to simulate intraday movement.
    pub fn quote(&self, ticker: &str) -> Quote {
        let series = self.historical(ticker);
        let last = series
            .last()
            .map(|r| r.resolved_price())
            .unwrap_or(1000.0);
        let mut rng = rand::thread_rng();
        let variation = (rng.gen::<f64>() - 0.5) * 0.02 * last;
        Quote {
            current_price: round2(last + variation),
            previous_close: Some(last),
            change: Some(round2(variation)),
            change_percent: Some(round2(variation / last * 100.0)),
        }
    }

    /// Mock prediction for `ticker` at the target calendar date: compound a
    /// random annual growth rate over the trading-day horizon and add noise.
    ///
    /// Fails only when the target date does not exist on the calendar.
    pub fn prediction(&self, ticker: &str, year: i32, month: u32, day: u32) -> Result<Prediction> {
        let Some(target) = NaiveDate::from_ymd_opt(year, month, day) else {
            bail!("invalid prediction date {year:04}-{month:02}-{day:02}");
        };

        let series = self.historical(ticker);
        let last = series
            .last()
            .map(|r| r.resolved_price())
            .unwrap_or(1000.0);

        let today = Local::now().date_naive();
        let days_from_now = (target - today).num_days();
        let trading_days =
            ((days_from_now as f64 * TRADING_DAYS_PER_YEAR / 365.0).floor()).max(0.0);

        let mut rng = rand::thread_rng();
        let growth_rate = rng.gen::<f64>() * 0.15 + 0.05;
        let noise = (rng.gen::<f64>() - 0.5) * 0.3;
        let predicted =
            last * (1.0 + growth_rate).powf(trading_days / TRADING_DAYS_PER_YEAR) * (1.0 + noise);

        Ok(Prediction {
            ticker: ticker.to_string(),
            year,
            month,
            day,
            predicted_price: round2(predicted),
            current_price: last,
            confidence: rng.gen_range(70..100),
            created_at: Utc::now().to_rfc3339(),
        })
    }

    /// Random-walk daily series, down-sampled to every `sample_step`-th day.
    fn generate_historical(&self, ticker: &str) -> Vec<HistoricalRecord> {
        let mut rng = StdRng::seed_from_u64(ticker_seed(ticker));
        let start = Local::now().date_naive() - Duration::days(self.history_days);
        let mut base = rng.gen::<f64>() * 2000.0 + 500.0;

        let mut daily = Vec::with_capacity(self.history_days as usize);
        for i in 0..self.history_days {
            let date = start + Duration::days(i);
            let volatility = (rng.gen::<f64>() - 0.5) * 0.1;
            base = (base * (1.0 + volatility)).max(10.0);

            // A couple of tickers get a gentle upward drift so the demo
            // charts are not all random walks.
            match ticker {
                "TCS" | "INFY" => base *= 1.0002,
                "RELIANCE" => base *= 1.0001,
                _ => {}
            }

            daily.push(HistoricalRecord::with_price(
                date.format("%Y-%m-%d").to_string(),
                round2(base),
            ));
        }

        daily.into_iter().step_by(self.sample_step).collect()
    }
}

/// Stable per-ticker RNG seed so a ticker's series survives restarts.
fn ticker_seed(ticker: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    ticker.hash(&mut hasher);
    hasher.finish()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
