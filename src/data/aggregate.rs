//! Window filtering, calendar re-bucketing and moving averages.

use chrono::{DateTime, Datelike, Utc};

use crate::data::{Candle, CandleSeries};
use crate::indicators::moving_average;
use crate::interval::Rebucket;

/// Short moving-average window over close prices.
pub const MA_SHORT: usize = 5;
/// Long moving-average window over close prices.
pub const MA_LONG: usize = 20;

/// Drop every candle before `filter_start`. Applied before re-bucketing and
/// moving averages so out-of-window candles never leak into displayed
/// statistics. Idempotent for a fixed `filter_start`.
pub fn filter_window(series: &CandleSeries, filter_start: Option<DateTime<Utc>>) -> CandleSeries {
    match filter_start {
        Some(start) => CandleSeries::from_vec(
            series
                .iter()
                .filter(|c| c.timestamp >= start)
                .copied()
                .collect(),
        ),
        None => series.clone(),
    }
}

/// Calendar key of the bucket a candle falls into: ISO week (Monday start)
/// or calendar month.
fn bucket_key(timestamp: DateTime<Utc>, rule: Rebucket) -> (i32, u32) {
    match rule {
        Rebucket::Week => {
            let week = timestamp.iso_week();
            (week.year(), week.week())
        }
        Rebucket::Month => (timestamp.year(), timestamp.month()),
    }
}

/// Re-bucket a daily series into calendar buckets, one synthetic candle per
/// non-empty bucket: open from the first candle, close from the last, high =
/// max, low = min, volumes summed. The synthetic candle keeps the bucket's
/// first native timestamp. Buckets without candles emit nothing.
pub fn rebucket(series: &CandleSeries, rule: Rebucket) -> CandleSeries {
    let mut buckets: Vec<Candle> = Vec::new();
    let mut current: Option<Candle> = None;
    let mut current_key = (0, 0);

    for candle in series.iter() {
        let key = bucket_key(candle.timestamp, rule);

        if let Some(ref mut agg) = current {
            if key == current_key {
                agg.high = agg.high.max(candle.high);
                agg.low = agg.low.min(candle.low);
                agg.close = candle.close;
                agg.volume_from += candle.volume_from;
                agg.volume_to += candle.volume_to;
            } else {
                buckets.push(*agg);
                *agg = *candle;
                current_key = key;
            }
        } else {
            current = Some(*candle);
            current_key = key;
        }
    }

    if let Some(agg) = current {
        buckets.push(agg);
    }

    CandleSeries::from_vec(buckets)
}

/// Candle series plus moving-average columns aligned by index. Positions
/// before a window fills hold `None`, never zero.
#[derive(Debug, Clone)]
pub struct EnrichedSeries {
    pub series: CandleSeries,
    pub ma_5: Vec<Option<f64>>,
    pub ma_20: Vec<Option<f64>>,
}

/// Compute the MA_5 / MA_20 columns over close prices.
pub fn enrich(series: CandleSeries) -> EnrichedSeries {
    let closes = series.closes();
    EnrichedSeries {
        ma_5: moving_average(&closes, MA_SHORT),
        ma_20: moving_average(&closes, MA_LONG),
        series,
    }
}
