// =============================================================================
// Moving Average Convergence Divergence (MACD 12/26/9)
// =============================================================================
//
// macd_i   = EMA12_i - EMA26_i
// signal_i = EMA(9) of the macd series itself, seeded with macd_0.
//
// Because both EMAs run from index 0 (see `ema.rs`), the MACD line is
// numerically defined for every index even though it is not meaningful before
// roughly 26 samples.  That is the charting contract — the line fades in
// rather than starting late.

use crate::indicators::{ema_series, IndicatorPoint};
use crate::types::PricePoint;

/// Fast EMA period.
pub const MACD_FAST: usize = 12;
/// Slow EMA period.
pub const MACD_SLOW: usize = 26;
/// Signal-line smoothing period.
pub const MACD_SIGNAL: usize = 9;

/// The MACD line and its signal line, both index-aligned with the input.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<IndicatorPoint>,
    pub signal: Vec<IndicatorPoint>,
}

/// Compute the MACD line and its EMA(9) signal over the normalized series.
pub fn macd_series(points: &[PricePoint]) -> MacdSeries {
    let ema_fast = ema_series(points, MACD_FAST);
    let ema_slow = ema_series(points, MACD_SLOW);

    let macd: Vec<IndicatorPoint> = points
        .iter()
        .enumerate()
        .map(|(i, point)| IndicatorPoint {
            timestamp: point.timestamp,
            value: Some(
                ema_fast[i].value.unwrap_or(0.0) - ema_slow[i].value.unwrap_or(0.0),
            ),
        })
        .collect();

    // EMA(9) recurrence applied directly to the macd values, seeded with the
    // first macd value.
    let mut signal = Vec::with_capacity(macd.len());
    if let Some(first) = macd.first() {
        let k = 2.0 / (MACD_SIGNAL as f64 + 1.0);
        let mut prev = first.value.unwrap_or(0.0);
        signal.push(IndicatorPoint {
            timestamp: first.timestamp,
            value: Some(prev),
        });
        for point in &macd[1..] {
            let raw = point.value.unwrap_or(0.0);
            let smoothed = raw * k + prev * (1.0 - k);
            signal.push(IndicatorPoint {
                timestamp: point.timestamp,
                value: Some(smoothed),
            });
            prev = smoothed;
        }
    }

    MacdSeries { macd, signal }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                timestamp: i as i64 * 86_400_000,
                price,
            })
            .collect()
    }

    #[test]
    fn empty_input() {
        let out = macd_series(&[]);
        assert!(out.macd.is_empty());
        assert!(out.signal.is_empty());
    }

    #[test]
    fn defined_from_index_zero() {
        let pts = points(&[100.0, 101.0, 99.0]);
        let out = macd_series(&pts);
        assert_eq!(out.macd.len(), 3);
        assert_eq!(out.signal.len(), 3);
        assert!(out.macd.iter().all(|p| p.value.is_some()));
        assert!(out.signal.iter().all(|p| p.value.is_some()));
        // Both EMAs seed with price[0], so the MACD line starts at zero and
        // the signal seeds from it.
        assert_eq!(out.macd[0].value, Some(0.0));
        assert_eq!(out.signal[0].value, Some(0.0));
    }

    #[test]
    fn flat_series_is_zero_everywhere() {
        let out = macd_series(&points(&[42.0; 60]));
        for (m, s) in out.macd.iter().zip(out.signal.iter()) {
            assert!(m.value.unwrap().abs() < 1e-12);
            assert!(s.value.unwrap().abs() < 1e-12);
        }
    }

    #[test]
    fn uptrend_gives_positive_macd() {
        // In a sustained uptrend the fast EMA sits above the slow EMA.
        let prices: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
        let out = macd_series(&points(&prices));
        let last = out.macd.last().unwrap().value.unwrap();
        assert!(last > 0.0, "expected positive MACD in uptrend, got {last}");
        // Signal lags the MACD line in a monotone trend.
        let last_signal = out.signal.last().unwrap().value.unwrap();
        assert!(last > last_signal);
    }

    #[test]
    fn idempotent_on_same_input() {
        let prices: Vec<f64> = (0..50).map(|i| 200.0 + (i as f64 * 0.3).sin() * 15.0).collect();
        let pts = points(&prices);
        let a = macd_series(&pts);
        let b = macd_series(&pts);
        for (x, y) in a.macd.iter().zip(b.macd.iter()) {
            assert_eq!(x.value, y.value);
        }
        for (x, y) in a.signal.iter().zip(b.signal.iter()) {
            assert_eq!(x.value, y.value);
        }
    }
}
