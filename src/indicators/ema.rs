// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// Recursively weighted average emphasizing recent prices.
//
// Formula:
//   k     = 2 / (period + 1)
//   EMA_0 = price_0
//   EMA_i = price_i * k + EMA_{i-1} * (1 - k)
//
// Unlike the SMA, the EMA is seeded with the first price and therefore
// defined from index 0 — there is no warm-up `None` prefix.  The chart treats
// the early values as provisional; do not "fix" this by inserting nulls.

use crate::indicators::IndicatorPoint;
use crate::types::PricePoint;

/// Compute the EMA series for the given points and look-back `period`.
///
/// The output has exactly one element per input point and every `value` is
/// `Some` for non-empty input.
pub fn ema_series(points: &[PricePoint], period: usize) -> Vec<IndicatorPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let k = 2.0 / (period as f64 + 1.0);

    let mut result = Vec::with_capacity(points.len());
    result.push(IndicatorPoint {
        timestamp: first.timestamp,
        value: Some(first.price),
    });

    let mut prev = first.price;
    for point in &points[1..] {
        let ema = point.price * k + prev * (1.0 - k);
        result.push(IndicatorPoint {
            timestamp: point.timestamp,
            value: Some(ema),
        });
        prev = ema;
    }
    result
}
