// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean over a trailing fixed-size window.  The first `period - 1`
// positions have no full window and are emitted as `None`.

use crate::indicators::IndicatorPoint;
use crate::types::PricePoint;

/// Compute the SMA series for the given points and look-back `period`.
///
/// The output has exactly one element per input point.  Index `i` holds
/// `None` when `i < period - 1`, otherwise the mean of the inclusive window
/// `[i - period + 1, i]`.  Each window is summed from scratch; the series is
/// short enough (weekly samples) that an incremental running sum buys
/// nothing.
pub fn sma_series(points: &[PricePoint], period: usize) -> Vec<IndicatorPoint> {
    let mut result = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        if i + 1 < period {
            result.push(IndicatorPoint {
                timestamp: point.timestamp,
                value: None,
            });
            continue;
        }
        let window = &points[i + 1 - period..=i];
        let sum: f64 = window.iter().map(|p| p.price).sum();
        result.push(IndicatorPoint {
            timestamp: point.timestamp,
            value: Some(sum / period as f64),
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
        assert!(sma_series(&[], 20).is_empty());
    }

    #[test]
    fn shorter_than_period_is_all_none() {
        let pts = points(&[1.0, 2.0, 3.0]);
        let sma = sma_series(&pts, 20);
        assert_eq!(sma.len(), 3);
        assert!(sma.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn warmup_then_window_means() {
        let pts = points(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        let sma = sma_series(&pts, 3);
        assert_eq!(sma.len(), 5);
        assert!(sma[0].value.is_none());
        assert!(sma[1].value.is_none());
        assert_eq!(sma[2].value, Some(4.0));
        assert_eq!(sma[3].value, Some(6.0));
        assert_eq!(sma[4].value, Some(8.0));
    }

    #[test]
    fn period_one_is_identity() {
        let pts = points(&[5.0, 7.0, 9.0]);
        let sma = sma_series(&pts, 1);
        let values: Vec<f64> = sma.iter().map(|p| p.value.unwrap()).collect();
        assert_eq!(values, vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn timestamps_are_aligned_with_input() {
        let pts = points(&[1.0, 2.0, 3.0, 4.0]);
        let sma = sma_series(&pts, 2);
        for (input, output) in pts.iter().zip(sma.iter()) {
            assert_eq!(input.timestamp, output.timestamp);
        }
    }

    #[test]
    fn scenario_fifteen_points_period_fourteen() {
        // Fifteen-point acceptance scenario: SMA(14) is None through index 12
        // and equals the mean of points 0..=13 at index 13.
        let prices = [
            100.0, 102.0, 101.0, 105.0, 107.0, 104.0, 108.0, 110.0, 109.0,
            112.0, 115.0, 111.0, 113.0, 116.0, 118.0,
        ];
        let sma = sma_series(&points(&prices), 14);
        for p in &sma[..13] {
            assert!(p.value.is_none());
        }
        let expected: f64 = prices[..14].iter().sum::<f64>() / 14.0;
        assert!((sma[13].value.unwrap() - expected).abs() < 1e-10);
        assert!(sma[14].value.is_some());
    }
}
