//! Trailing simple moving average

use crate::indicators::Indicator;
use ta::indicators::SimpleMovingAverage;
use ta::Next;

/// Trailing SMA over a streamed value column. Reports `None` until the
/// window is full, so warm-up positions are never plotted as zero.
#[derive(Debug)]
pub struct Sma {
    inner: SimpleMovingAverage,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            inner: SimpleMovingAverage::new(period).unwrap(),
            period,
            update_count: 0,
            last_value: None,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        "SMA"
    }

    fn update(&mut self, value: f64) {
        let sma_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(sma_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Compute a trailing SMA column over `values`. Position `i` holds the mean
/// of `values[i + 1 - period ..= i]`, or `None` while `i + 1 < period`.
pub fn moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma = Sma::new(period);
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        sma.update(value);
        results.push(sma.value());
    }

    results
}
