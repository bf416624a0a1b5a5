// =============================================================================
// Average Directional Index (ADX 14) — single-price simplification
// =============================================================================
//
// ADX quantifies trend strength regardless of direction.
//
// Calculation pipeline:
//   1. Per-index True Range and ±directional movement.
//   2. Wilder-smooth TR, +DM, -DM over `period` samples.
//   3. +DI = 100 * smoothed(+DM) / smoothed(TR), likewise -DI.
//   4. DX  = 100 * |+DI - -DI| / (+DI + -DI).
//   5. ADX = Wilder-smoothed average of DX, seeded after two full periods.
//
// The dashboard has no OHLC feed — only a single price per sample — so high,
// low, and close are all the same value.  True range collapses to |Δprice|
// and +DM / -DM become mutually exclusive.  This is a deliberate
// visualization-grade approximation; do not introduce synthetic highs/lows.

use crate::indicators::IndicatorPoint;
use crate::types::PricePoint;

/// Standard ADX look-back used by the dashboard.
pub const ADX_PERIOD: usize = 14;

/// Compute the ADX series over the normalized points.
///
/// Output is index-aligned with the input: `None` below index `2 * period`,
/// a trend-strength value (practically within [0, 100]) from there on.
pub fn adx_series(points: &[PricePoint], period: usize) -> Vec<IndicatorPoint> {
    let n = points.len();
    let period_f = period as f64;

    // ── Step 1: raw TR and directional movement ─────────────────────────
    let mut trs = vec![0.0_f64; n];
    let mut plus_dm = vec![0.0_f64; n];
    let mut minus_dm = vec![0.0_f64; n];
    for i in 1..n {
        let high = points[i].price;
        let low = points[i].price;
        let prev_high = points[i - 1].price;
        let prev_low = points[i - 1].price;

        let up_move = high - prev_high;
        let down_move = prev_low - low;
        plus_dm[i] = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        minus_dm[i] = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };
        trs[i] = (high - prev_high)
            .abs()
            .max((low - prev_low).abs())
            .max((high - low).abs());
    }

    // ── Step 2: Wilder smoothing of TR, +DM, -DM ────────────────────────
    // The first `period` indices accumulate into running sums and record a
    // smoothed value of 0; index `period` records the accumulated sum (not
    // yet averaged); afterwards s[i] = s[i-1] - s[i-1]/period + raw[i].
    let mut smooth_tr = vec![0.0_f64; n];
    let mut smooth_plus = vec![0.0_f64; n];
    let mut smooth_minus = vec![0.0_f64; n];
    let mut tr_sum = 0.0_f64;
    let mut plus_sum = 0.0_f64;
    let mut minus_sum = 0.0_f64;
    for i in 0..n {
        if i < period {
            tr_sum += trs[i];
            plus_sum += plus_dm[i];
            minus_sum += minus_dm[i];
            continue;
        }
        if i == period {
            tr_sum += trs[i];
            plus_sum += plus_dm[i];
            minus_sum += minus_dm[i];
            smooth_tr[i] = tr_sum;
            smooth_plus[i] = plus_sum;
            smooth_minus[i] = minus_sum;
            continue;
        }
        smooth_tr[i] = smooth_tr[i - 1] - smooth_tr[i - 1] / period_f + trs[i];
        smooth_plus[i] = smooth_plus[i - 1] - smooth_plus[i - 1] / period_f + plus_dm[i];
        smooth_minus[i] = smooth_minus[i - 1] - smooth_minus[i - 1] / period_f + minus_dm[i];
    }

    // ── Steps 3 & 4: DI and DX per index ────────────────────────────────
    // While smoothed TR is zero (warm-up, or a perfectly flat series) both
    // DIs read as 0 and the DX denominator guard kicks in.
    let mut dx = vec![0.0_f64; n];
    for i in 0..n {
        let tr = smooth_tr[i];
        let (plus_di, minus_di) = if tr == 0.0 {
            (0.0, 0.0)
        } else {
            (smooth_plus[i] / tr * 100.0, smooth_minus[i] / tr * 100.0)
        };
        let denom = if plus_di + minus_di == 0.0 {
            1.0
        } else {
            plus_di + minus_di
        };
        dx[i] = (plus_di - minus_di).abs() / denom * 100.0;
    }

    // ── Step 5: ADX seed and Wilder smoothing ───────────────────────────
    let mut result = Vec::with_capacity(n);
    let mut adx_prev = 0.0_f64;
    for (i, point) in points.iter().enumerate() {
        if i < period * 2 {
            adx_prev += dx[i];
            result.push(IndicatorPoint {
                timestamp: point.timestamp,
                value: None,
            });
            continue;
        }
        if i == period * 2 {
            adx_prev /= period_f;
        } else {
            adx_prev = (adx_prev * (period_f - 1.0) + dx[i]) / period_f;
        }
        result.push(IndicatorPoint {
            timestamp: point.timestamp,
            value: Some(adx_prev),
        });
    }

    result
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
        assert!(adx_series(&[], ADX_PERIOD).is_empty());
    }

    #[test]
    fn warmup_spans_two_full_periods() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let adx = adx_series(&points(&prices), ADX_PERIOD);
        assert_eq!(adx.len(), 40);
        for i in 0..28 {
            assert!(adx[i].value.is_none(), "expected None at index {i}");
        }
        for i in 28..40 {
            assert!(adx[i].value.is_some(), "expected value at index {i}");
        }
    }

    #[test]
    fn single_point_is_none() {
        let adx = adx_series(&points(&[123.0]), ADX_PERIOD);
        assert_eq!(adx.len(), 1);
        assert!(adx[0].value.is_none());
    }

    #[test]
    fn strong_uptrend_reads_high() {
        // Monotone rise: -DM is always 0, every DX is 100, so the seeded ADX
        // should sit well above the 25 "trending" threshold.
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let adx = adx_series(&points(&prices), ADX_PERIOD);
        let value = adx.last().unwrap().value.unwrap();
        assert!(value > 25.0, "expected ADX > 25 for strong trend, got {value}");
    }

    #[test]
    fn flat_series_reads_zero() {
        // No movement at all: TR never accumulates, both DIs stay 0, and the
        // DX denominator guard keeps everything at 0.
        let adx = adx_series(&points(&[100.0; 60]), ADX_PERIOD);
        for p in adx.iter().skip(28) {
            assert!(p.value.unwrap().abs() < 1e-12);
        }
    }

    #[test]
    fn bounded_in_practice() {
        let prices: Vec<f64> = (0..150)
            .map(|i| 800.0 + (i as f64 * 0.31).sin() * 60.0 + (i as f64 * 0.07).cos() * 25.0)
            .collect();
        let adx = adx_series(&points(&prices), ADX_PERIOD);
        for p in adx.iter().skip(28) {
            let v = p.value.unwrap();
            assert!((0.0..=100.0).contains(&v), "ADX {v} out of [0,100]");
        }
    }

    #[test]
    fn idempotent_on_same_input() {
        let prices: Vec<f64> = (0..70).map(|i| 50.0 + (i as f64 * 0.5).sin() * 5.0).collect();
        let pts = points(&prices);
        let a = adx_series(&pts, ADX_PERIOD);
        let b = adx_series(&pts, ADX_PERIOD);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.value, y.value);
        }
    }
}
