//! OHLCV candle data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV summary record for a fixed time bucket.
///
/// Candles are immutable once fetched. The usual `low <= open, close <= high`
/// relation is NOT enforced here: the provider does not guarantee it, and
/// violating rows pass through untouched rather than becoming errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket timestamp
    pub timestamp: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume in the base currency
    pub volume_from: f64,
    /// Volume in the quote currency
    pub volume_to: f64,
}

impl Candle {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume_from: f64,
        volume_to: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume_from,
            volume_to,
        }
    }
}

/// Ordered candle sequence: strictly increasing timestamps, no duplicates.
///
/// The constructor enforces the invariant by sorting and dropping duplicate
/// timestamps (first occurrence wins), so a series built from any provider
/// response is safe to window-filter and re-bucket.
#[derive(Debug, Clone, Default)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            candles: Vec::new(),
        }
    }

    /// Build a series from candles in any order.
    pub fn from_vec(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        candles.dedup_by_key(|c| c.timestamp);
        Self { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// All candles, ascending by timestamp.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    /// Close prices as a dense column.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::from_vec(candles)
    }
}
