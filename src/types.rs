// =============================================================================
// Shared types used across the StockLens dashboard backend
// =============================================================================

use serde::{Deserialize, Serialize};

/// A listed company the dashboard can chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub ticker: String,
    pub name: String,
}

/// One raw historical data point as it travels over the wire.
///
/// Different upstream sources disagree on the field name for the closing
/// price, so all three candidates are optional and resolved in priority
/// order (`price`, then `close`, then `close_price`) by the series
/// normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_price: Option<f64>,
}

impl HistoricalRecord {
    /// Build a record that carries its value in the `price` field.
    pub fn with_price(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price: Some(price),
            close: None,
            close_price: None,
        }
    }

    /// Resolve the closing price using the documented priority order,
    /// defaulting to `0.0` when no price field is present.
    pub fn resolved_price(&self) -> f64 {
        self.price
            .or(self.close)
            .or(self.close_price)
            .unwrap_or(0.0)
    }
}

/// A normalized sample: epoch-millisecond timestamp plus price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}

/// Real-time-ish quote for a single ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

/// A model price prediction for a ticker at a target calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub ticker: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub predicted_price: f64,
    pub current_price: f64,
    /// Confidence score in [0, 100].
    pub confidence: u32,
    /// RFC 3339 timestamp of when the prediction was produced.
    pub created_at: String,
}
