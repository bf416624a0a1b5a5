// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the technical indicators rendered
// on the favorites dashboard.  Every transform consumes a normalized
// `&[PricePoint]` slice and produces an output series of exactly the same
// length, index-aligned with the input.  `Option<f64>` marks warm-up
// positions where a windowed indicator has insufficient history.
//
// No transform performs I/O or touches shared state; running any of them
// twice on the same input yields bit-identical output.

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod merge;
pub mod rsi;
pub mod series;
pub mod sma;

use serde::{Deserialize, Serialize};

// Re-exports for convenient access (e.g. `use crate::indicators::sma_series`).
pub use adx::adx_series;
pub use bollinger::{bollinger_bands, BollingerSeries};
pub use ema::ema_series;
pub use macd::{macd_series, MacdSeries};
pub use merge::{merge_indicators, IndicatorChart, MergedRecord};
pub use rsi::rsi_series;
pub use series::normalize_series;
pub use sma::sma_series;

/// One sample of an indicator series.  `value` is `None` during the
/// indicator's warm-up period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub timestamp: i64,
    pub value: Option<f64>,
}
