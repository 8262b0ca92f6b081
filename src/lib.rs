//! Candleboard: market-data core for a crypto OHLC dashboard
//!
//! This crate fetches OHLCV candles from a histo-candle HTTP provider and
//! turns a UI parameter snapshot into chart-ready series:
//!
//! - **Symbol & interval tables**: static catalogs of supported pairs and
//!   granularities
//! - **Window resolution**: count sliders, offset sliders and date pickers
//!   resolved into one concrete provider query
//! - **Aggregation**: window filtering, daily-to-weekly/monthly re-bucketing
//!   and moving averages
//! - **Chart assembly**: line, candlestick and volume series plus summary
//!   statistics per symbol
//! - **Render cycle**: concurrent per-symbol fetches with partial-failure
//!   isolation and stale-cycle discard ids
//!
//! # Example
//!
//! ```no_run
//! use candleboard::prelude::*;
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> candleboard::Result<()> {
//!     let client = MarketDataClient::new(&ProviderConfig::from_env())?;
//!     let dashboard = Dashboard::new(client);
//!
//!     let params = RenderParams {
//!         symbols: vec!["BTC/JPY".to_string(), "ETH/JPY".to_string()],
//!         interval: "1d".to_string(),
//!         window: WindowMode::Recent { count: 30 },
//!     };
//!
//!     let view = dashboard.render(&params, Utc::now()).await?;
//!     for failed in view.failed_labels() {
//!         eprintln!("no data for {failed}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod chart;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod interval;
pub mod provider;
pub mod window;

// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::SymbolCatalog;
    pub use crate::chart::{ChartAssembler, SummaryStats, SymbolChart};
    pub use crate::config::ProviderConfig;
    pub use crate::data::{Candle, CandleSeries, EnrichedSeries};
    pub use crate::engine::{Dashboard, RenderParams, SymbolSlot, ViewModel};
    pub use crate::error::{Error, Result};
    pub use crate::interval::{IntervalPolicy, IntervalSpec, Rebucket, Unit};
    pub use crate::provider::{CandleSource, MarketDataClient};
    pub use crate::window::{QueryWindow, RenderWarning, WindowMode, WindowResolver};
}

pub use error::{Error, Result};
