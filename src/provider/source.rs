//! Candle source trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::data::CandleSeries;
use crate::error::Result;
use crate::interval::Unit;

/// Anything that can serve historical candles for a ticker.
///
/// The dashboard engine is generic over this trait so tests and alternative
/// providers can stand in for the HTTP client.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch up to `sample_count` candles of `unit` granularity ending at
    /// `end_timestamp` (or now, when `None`), ascending by time.
    async fn fetch(
        &self,
        ticker: &str,
        unit: Unit,
        sample_count: usize,
        end_timestamp: Option<DateTime<Utc>>,
    ) -> Result<CandleSeries>;
}
