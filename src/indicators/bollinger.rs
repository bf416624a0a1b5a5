// =============================================================================
// Bollinger Bands (20, 2)
// =============================================================================
//
// Middle band = SMA(period); upper/lower = middle ± `width` standard
// deviations.  The deviation is the *population* standard deviation (divide
// by `period`, not `period - 1`) over the same window as the middle band,
// measured against the window mean — which is exactly the middle-band value,
// so the envelope is guaranteed symmetric around the plotted middle line.

use crate::indicators::{sma_series, IndicatorPoint};
use crate::types::PricePoint;

/// Default look-back window for the dashboard's Bollinger chart.
pub const BB_PERIOD: usize = 20;
/// Default band width in standard deviations.
pub const BB_WIDTH: f64 = 2.0;

/// The three aligned band series.  All share the input's length; all three
/// are `None` at warm-up indices (`i < period - 1`).
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<IndicatorPoint>,
    pub middle: Vec<IndicatorPoint>,
    pub lower: Vec<IndicatorPoint>,
}

/// Calculate Bollinger Bands over the normalized series.
pub fn bollinger_bands(points: &[PricePoint], period: usize, width: f64) -> BollingerSeries {
    let middle = sma_series(points, period);
    let mut upper = Vec::with_capacity(points.len());
    let mut lower = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        let Some(mean) = middle[i].value else {
            upper.push(IndicatorPoint {
                timestamp: point.timestamp,
                value: None,
            });
            lower.push(IndicatorPoint {
                timestamp: point.timestamp,
                value: None,
            });
            continue;
        };

        let window = &points[i + 1 - period..=i];
        let variance = window
            .iter()
            .map(|p| (p.price - mean).powi(2))
            .sum::<f64>()
            / period as f64;
        let std_dev = variance.sqrt();

        upper.push(IndicatorPoint {
            timestamp: point.timestamp,
            value: Some(mean + width * std_dev),
        });
        lower.push(IndicatorPoint {
            timestamp: point.timestamp,
            value: Some(mean - width * std_dev),
        });
    }

    BollingerSeries {
        upper,
        middle,
        lower,
    }
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
    fn warmup_prefix_is_none_on_all_bands() {
        let pts = points(&(1..=25).map(|x| x as f64).collect::<Vec<_>>());
        let bb = bollinger_bands(&pts, BB_PERIOD, BB_WIDTH);
        for i in 0..19 {
            assert!(bb.upper[i].value.is_none());
            assert!(bb.middle[i].value.is_none());
            assert!(bb.lower[i].value.is_none());
        }
        for i in 19..25 {
            assert!(bb.upper[i].value.is_some());
            assert!(bb.middle[i].value.is_some());
            assert!(bb.lower[i].value.is_some());
        }
    }

    #[test]
    fn input_shorter_than_period_is_all_none() {
        let pts = points(&[1.0, 2.0, 3.0]);
        let bb = bollinger_bands(&pts, BB_PERIOD, BB_WIDTH);
        assert_eq!(bb.upper.len(), 3);
        assert!(bb.upper.iter().all(|p| p.value.is_none()));
        assert!(bb.lower.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn flat_series_collapses_bands_onto_middle() {
        let pts = points(&[100.0; 30]);
        let bb = bollinger_bands(&pts, BB_PERIOD, BB_WIDTH);
        for i in 19..30 {
            assert!((bb.upper[i].value.unwrap() - 100.0).abs() < 1e-12);
            assert!((bb.middle[i].value.unwrap() - 100.0).abs() < 1e-12);
            assert!((bb.lower[i].value.unwrap() - 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn bands_symmetric_around_middle() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 8.0).collect();
        let bb = bollinger_bands(&points(&prices), BB_PERIOD, BB_WIDTH);
        for i in 19..40 {
            let upper = bb.upper[i].value.unwrap();
            let middle = bb.middle[i].value.unwrap();
            let lower = bb.lower[i].value.unwrap();
            assert!(
                ((upper - middle) - (middle - lower)).abs() < 1e-9,
                "asymmetric band at index {i}"
            );
            assert!(upper >= middle && middle >= lower);
        }
    }

    #[test]
    fn population_stddev_small_window() {
        // period 2, width 2: window [2, 4] has mean 3 and population
        // variance ((2-3)^2 + (4-3)^2) / 2 = 1, so sigma = 1.
        let bb = bollinger_bands(&points(&[2.0, 4.0]), 2, 2.0);
        assert_eq!(bb.middle[1].value, Some(3.0));
        assert_eq!(bb.upper[1].value, Some(5.0));
        assert_eq!(bb.lower[1].value, Some(1.0));
    }
}
