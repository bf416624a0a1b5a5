// =============================================================================
// Relative Strength Index (RSI 14) — Wilder's smoothing
// =============================================================================
//
// Step 1 — Accumulate raw gain/loss sums over the first `period` deltas,
//          emitting `None` until index `period`.
// Step 2 — At index `period`, emit RSI from the *raw sums* (not yet
//          averaged), then convert the sums into Wilder averages.
// Step 3 — For later indices apply Wilder's smoothing:
//            gains  = (gains  * (period - 1) + gain) / period
//            losses = (losses * (period - 1) + loss) / period
//          and RSI = 100 - 100 / (1 + gains / losses).
//
// Zero-division guards reproduce the dashboard's historical behaviour and are
// intentionally asymmetric.  At the seed index the whole denominator
// `1 + gains/losses` falls back to 1 only when it is NaN (flat prefix, 0/0),
// giving RSI 0; an all-gains prefix divides by +inf and lands on RSI 100.
// After the seed, a zero loss average is substituted with 1 (not floored),
// so `rs = gains` in that case.  Changing either guard changes plotted
// values — keep them as they are.

use crate::indicators::IndicatorPoint;
use crate::types::PricePoint;

/// Standard RSI look-back used by the dashboard.
pub const RSI_PERIOD: usize = 14;

/// Compute the RSI series over the normalized points.
///
/// Output is index-aligned with the input: `None` for every index below
/// `period`, a value in [0, 100] from index `period` on.
pub fn rsi_series(points: &[PricePoint], period: usize) -> Vec<IndicatorPoint> {
    let period_f = period as f64;
    let mut result = Vec::with_capacity(points.len());
    let mut gains = 0.0_f64;
    let mut losses = 0.0_f64;

    for (i, point) in points.iter().enumerate() {
        if i == 0 {
            result.push(IndicatorPoint {
                timestamp: point.timestamp,
                value: None,
            });
            continue;
        }

        let change = point.price - points[i - 1].price;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if i <= period {
            gains += gain;
            losses += loss;
            let value = if i == period {
                let mut denom = 1.0 + gains / losses;
                if denom.is_nan() {
                    denom = 1.0;
                }
                Some(100.0 - 100.0 / denom)
            } else {
                None
            };
            result.push(IndicatorPoint {
                timestamp: point.timestamp,
                value,
            });
            if i == period {
                // The raw sums become Wilder averages from here on.
                gains /= period_f;
                losses /= period_f;
            }
            continue;
        }

        gains = (gains * (period_f - 1.0) + gain) / period_f;
        losses = (losses * (period_f - 1.0) + loss) / period_f;
        let rs = gains / if losses == 0.0 { 1.0 } else { losses };
        result.push(IndicatorPoint {
            timestamp: point.timestamp,
            value: Some(100.0 - 100.0 / (1.0 + rs)),
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
        assert!(rsi_series(&[], RSI_PERIOD).is_empty());
    }

    #[test]
    fn warmup_prefix_is_none() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let rsi = rsi_series(&points(&prices), RSI_PERIOD);
        for i in 0..RSI_PERIOD {
            assert!(rsi[i].value.is_none(), "expected None at index {i}");
        }
        for i in RSI_PERIOD..30 {
            assert!(rsi[i].value.is_some(), "expected value at index {i}");
        }
    }

    #[test]
    fn bounded_between_zero_and_hundred() {
        let prices: Vec<f64> = (0..120)
            .map(|i| 500.0 + (i as f64 * 0.7).sin() * 40.0 + (i as f64 * 0.13).cos() * 15.0)
            .collect();
        let rsi = rsi_series(&points(&prices), RSI_PERIOD);
        for p in rsi.iter().skip(RSI_PERIOD) {
            let v = p.value.unwrap();
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn all_gains_hits_hundred_at_seed() {
        // Strictly ascending prices: the seed-index denominator is +inf,
        // which resolves to RSI 100.
        let prices: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let rsi = rsi_series(&points(&prices), RSI_PERIOD);
        assert_eq!(rsi[RSI_PERIOD].value, Some(100.0));
    }

    #[test]
    fn flat_prefix_hits_zero_at_seed() {
        // No movement at all: 0/0 makes the denominator NaN, which falls back
        // to 1 and yields RSI 0.  Historical guard, preserved.
        let rsi = rsi_series(&points(&[100.0; 20]), RSI_PERIOD);
        assert_eq!(rsi[RSI_PERIOD].value, Some(0.0));
    }

    #[test]
    fn all_losses_is_zero() {
        let prices: Vec<f64> = (1..=20).rev().map(|x| x as f64).collect();
        let rsi = rsi_series(&points(&prices), RSI_PERIOD);
        for p in rsi.iter().skip(RSI_PERIOD) {
            assert!(p.value.unwrap().abs() < 1e-10);
        }
    }

    #[test]
    fn scenario_fifteen_points() {
        let prices = [
            100.0, 102.0, 101.0, 105.0, 107.0, 104.0, 108.0, 110.0, 109.0,
            112.0, 115.0, 111.0, 113.0, 116.0, 118.0,
        ];
        let rsi = rsi_series(&points(&prices), RSI_PERIOD);
        for i in 0..14 {
            assert!(rsi[i].value.is_none());
        }
        let seed = rsi[14].value.unwrap();
        assert!(seed.is_finite());
        assert!((0.0..=100.0).contains(&seed));
        // Gains dominate losses in this series, so the oscillator leans high.
        assert!(seed > 50.0);
    }

    #[test]
    fn wilder_smoothing_after_seed() {
        // Hand-derived check with period 2: prices [1, 2, 3, 4].
        // i=1: gains=1; i=2 (seed): gains=2, losses=0 => RSI 100, then
        // averages gains=1, losses=0.
        // i=3: gains=(1*1+1)/2=1, losses=0 => rs = 1/1 = 1 => RSI 50.
        let rsi = rsi_series(&points(&[1.0, 2.0, 3.0, 4.0]), 2);
        assert!(rsi[0].value.is_none());
        assert!(rsi[1].value.is_none());
        assert_eq!(rsi[2].value, Some(100.0));
        assert!((rsi[3].value.unwrap() - 50.0).abs() < 1e-10);
    }
}
