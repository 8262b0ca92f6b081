//! Chart-ready series and summary statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::EnrichedSeries;

/// One point of the close-price line chart, with moving-average overlays.
/// Warm-up positions carry `None` and must not be plotted as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub time: DateTime<Utc>,
    pub close: f64,
    pub ma_5: Option<f64>,
    pub ma_20: Option<f64>,
}

/// One candlestick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandlePoint {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One bar of the volume overlay (base-currency volume).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumePoint {
    pub time: DateTime<Utc>,
    pub volume_from: f64,
}

/// Summary statistics over the displayed window. Absent entirely for an
/// empty series rather than reported as zero or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub max_high: f64,
    pub min_low: f64,
    pub mean_close: f64,
}

/// Everything the rendering layer needs for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolChart {
    /// Display pair label, e.g. "BTC/JPY".
    pub label: String,
    /// Provider ticker code, e.g. "BTC".
    pub ticker: String,
    /// strftime format for time-axis tick labels.
    pub display_format: &'static str,
    pub line: Vec<LinePoint>,
    pub candles: Vec<CandlePoint>,
    pub volume: Vec<VolumePoint>,
    /// `None` when the series is empty (a valid "no data" state).
    pub stats: Option<SummaryStats>,
}

impl SymbolChart {
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// Build the per-symbol rendering payload from a filtered, bucketed,
/// MA-enriched series.
pub struct ChartAssembler;

impl ChartAssembler {
    pub fn assemble(
        label: &str,
        ticker: &str,
        display_format: &'static str,
        enriched: &EnrichedSeries,
    ) -> SymbolChart {
        let line = enriched
            .series
            .iter()
            .enumerate()
            .map(|(i, c)| LinePoint {
                time: c.timestamp,
                close: c.close,
                ma_5: enriched.ma_5[i],
                ma_20: enriched.ma_20[i],
            })
            .collect();

        let candles = enriched
            .series
            .iter()
            .map(|c| CandlePoint {
                time: c.timestamp,
                open: c.open,
                high: c.high,
                low: c.low,
                close: c.close,
            })
            .collect();

        let volume = enriched
            .series
            .iter()
            .map(|c| VolumePoint {
                time: c.timestamp,
                volume_from: c.volume_from,
            })
            .collect();

        SymbolChart {
            label: label.to_string(),
            ticker: ticker.to_string(),
            display_format,
            line,
            candles,
            volume,
            stats: Self::summarize(enriched),
        }
    }

    fn summarize(enriched: &EnrichedSeries) -> Option<SummaryStats> {
        if enriched.series.is_empty() {
            return None;
        }

        let candles = enriched.series.candles();
        let max_high = candles.iter().map(|c| c.high).fold(f64::MIN, f64::max);
        let min_low = candles.iter().map(|c| c.low).fold(f64::MAX, f64::min);
        let mean_close =
            candles.iter().map(|c| c.close).sum::<f64>() / candles.len() as f64;

        Some(SummaryStats {
            max_high,
            min_low,
            mean_close,
        })
    }
}
