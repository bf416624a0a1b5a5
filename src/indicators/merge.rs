// =============================================================================
// Series Merger — one chart-ready record per input point
// =============================================================================
//
// Zips the normalized price series with every indicator series by index.  All
// transforms are length-preserving, so the zip never truncates.  Warm-up
// `None`s propagate into the merged record as JSON nulls, with one quirk the
// front-end charts rely on: the MACD pair defaults to 0 instead of null.

use serde::{Deserialize, Serialize};

use crate::indicators::{
    adx_series, bollinger_bands, macd_series, rsi_series, sma_series,
    adx::ADX_PERIOD, bollinger::{BB_PERIOD, BB_WIDTH}, rsi::RSI_PERIOD,
};
use crate::types::PricePoint;

/// One merged sample, carrying the close plus every indicator at that index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub timestamp: i64,
    pub close: f64,
    pub sma20: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub rsi: Option<f64>,
    pub adx: Option<f64>,
}

/// The full indicator payload for one ticker: merged records plus the
/// timestamp extremes used for the chart X-axis domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorChart {
    pub merged: Vec<MergedRecord>,
    /// Smallest merged timestamp; 0 when the series is empty.
    pub min_date: i64,
    /// Largest merged timestamp; 0 when the series is empty.
    pub max_date: i64,
}

/// Run every indicator over the normalized series and zip the results.
///
/// One atomic, synchronous computation: all series are recomputed in full
/// from the input on every call, with no caching and no partially merged
/// state ever observable.
pub fn merge_indicators(points: &[PricePoint]) -> IndicatorChart {
    let sma20 = sma_series(points, BB_PERIOD);
    let bb = bollinger_bands(points, BB_PERIOD, BB_WIDTH);
    let macd = macd_series(points);
    let rsi = rsi_series(points, RSI_PERIOD);
    let adx = adx_series(points, ADX_PERIOD);

    let merged: Vec<MergedRecord> = points
        .iter()
        .enumerate()
        .map(|(i, point)| MergedRecord {
            timestamp: point.timestamp,
            close: point.price,
            sma20: sma20[i].value,
            bb_upper: bb.upper[i].value,
            bb_middle: bb.middle[i].value,
            bb_lower: bb.lower[i].value,
            macd: macd.macd[i].value.unwrap_or(0.0),
            macd_signal: macd.signal[i].value.unwrap_or(0.0),
            rsi: rsi[i].value,
            adx: adx[i].value,
        })
        .collect();

    let min_date = merged.iter().map(|r| r.timestamp).min().unwrap_or(0);
    let max_date = merged.iter().map(|r| r.timestamp).max().unwrap_or(0);

    IndicatorChart {
        merged,
        min_date,
        max_date,
    }
}
