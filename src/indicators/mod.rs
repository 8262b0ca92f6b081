//! Technical indicators module
//!
//! Moving averages over close prices, backed by the `ta` crate.

pub mod sma;

pub use sma::*;

/// Streaming indicator over a single value column.
pub trait Indicator {
    /// Indicator name
    fn name(&self) -> &str;

    /// Feed the next value
    fn update(&mut self, value: f64);

    /// Current value, `None` until enough data has been seen
    fn value(&self) -> Option<f64>;

    /// Whether the indicator window is full
    fn is_ready(&self) -> bool;
}
