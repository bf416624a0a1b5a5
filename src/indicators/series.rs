// =============================================================================
// Series Normalizer
// =============================================================================
//
// Converts raw historical records (whose closing price may live under any of
// three field names) into the uniform `(timestamp, price)` sequence every
// indicator consumes.  Order and length are preserved verbatim: no filtering,
// no deduplication, no sorting.  Input with non-monotonic dates or negative
// prices is passed through untouched — the transforms downstream are total
// over whatever the upstream feed delivers.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};

use crate::types::{HistoricalRecord, PricePoint};

/// Normalize a raw historical series into `PricePoint`s.
///
/// Per record, the price is resolved in priority order `price` -> `close` ->
/// `close_price` -> `0.0`, and the timestamp is the record's calendar date at
/// local midnight in epoch milliseconds.  A date that fails to parse maps to
/// timestamp `0` (the upstream contract promises parseable dates; this is a
/// documented precondition, not something we validate).
pub fn normalize_series(records: &[HistoricalRecord]) -> Vec<PricePoint> {
    records
        .iter()
        .map(|r| PricePoint {
            timestamp: date_to_millis(&r.date),
            price: r.resolved_price(),
        })
        .collect()
}

/// Parse a `YYYY-MM-DD` date string to epoch milliseconds at local midnight.
pub fn date_to_millis(date: &str) -> i64 {
    let Ok(naive) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return 0;
    };
    let midnight = naive.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => 0,
    }
}
