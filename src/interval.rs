//! Interval policy: granularity labels to provider query specs.

use chrono::Duration;

use crate::error::{Error, Result};

/// Native time-bucket sizes the provider serves directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Minute,
    Hour,
    Day,
}

impl Unit {
    /// Path segment of the provider endpoint (`/data/v2/histo{unit}`).
    pub fn endpoint(&self) -> &'static str {
        match self {
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
        }
    }

    /// Wall-clock length of one native bucket.
    pub fn duration(&self) -> Duration {
        match self {
            Unit::Minute => Duration::minutes(1),
            Unit::Hour => Duration::hours(1),
            Unit::Day => Duration::days(1),
        }
    }
}

/// Synthetic granularities derived from daily candles. The provider has no
/// native weekly or monthly endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebucket {
    Week,
    Month,
}

impl Rebucket {
    /// Approximate native daily candles needed per synthetic bucket. Used to
    /// expand a bucket count into a provider sample count.
    pub fn native_factor(&self) -> usize {
        match self {
            Rebucket::Week => 7,
            Rebucket::Month => 30,
        }
    }
}

/// Query spec for one supported granularity label.
#[derive(Debug, Clone, Copy)]
pub struct IntervalSpec {
    /// Native granularity requested from the provider.
    pub unit: Unit,
    /// Upper bound on native candles per request. The provider itself caps
    /// `limit` at 2000.
    pub max_samples: usize,
    /// strftime format for tick labels on the time axis.
    pub display_format: &'static str,
    /// When set, daily candles are re-bucketed into this calendar unit
    /// after the window filter.
    pub rebucket: Option<Rebucket>,
}

impl IntervalSpec {
    /// Native candles per displayed bucket (1 unless re-bucketing).
    pub fn native_factor(&self) -> usize {
        self.rebucket.map_or(1, |r| r.native_factor())
    }

    /// Wall-clock length of one displayed bucket.
    pub fn bucket_duration(&self) -> Duration {
        self.unit.duration() * self.native_factor() as i32
    }

    /// Clamp a native sample count into `[1, max_samples]`.
    pub fn clamp_samples(&self, samples: usize) -> usize {
        samples.max(1).min(self.max_samples)
    }
}

/// Static table of supported granularity labels.
pub struct IntervalPolicy;

impl IntervalPolicy {
    /// Resolve a granularity label to its query spec.
    pub fn resolve(label: &str) -> Result<IntervalSpec> {
        match label {
            "1m" => Ok(IntervalSpec {
                unit: Unit::Minute,
                max_samples: 60,
                display_format: "%H:%M",
                rebucket: None,
            }),
            "1h" => Ok(IntervalSpec {
                unit: Unit::Hour,
                max_samples: 24,
                display_format: "%m-%d %H:%M",
                rebucket: None,
            }),
            "1d" => Ok(IntervalSpec {
                unit: Unit::Day,
                max_samples: 30,
                display_format: "%Y-%m-%d",
                rebucket: None,
            }),
            "1w" => Ok(IntervalSpec {
                unit: Unit::Day,
                max_samples: 364,
                display_format: "%Y-%m-%d",
                rebucket: Some(Rebucket::Week),
            }),
            "1M" => Ok(IntervalSpec {
                unit: Unit::Day,
                max_samples: 365,
                display_format: "%Y-%m-%d",
                rebucket: Some(Rebucket::Month),
            }),
            _ => Err(Error::UnknownInterval(label.to_string())),
        }
    }

    /// All granularity labels this policy knows, finest first.
    pub fn labels() -> &'static [&'static str] {
        &["1m", "1h", "1d", "1w", "1M"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_native_intervals() {
        let spec = IntervalPolicy::resolve("1m").unwrap();
        assert_eq!(spec.unit, Unit::Minute);
        assert_eq!(spec.max_samples, 60);
        assert!(spec.rebucket.is_none());

        let spec = IntervalPolicy::resolve("1h").unwrap();
        assert_eq!(spec.unit, Unit::Hour);
        assert_eq!(spec.max_samples, 24);
    }

    #[test]
    fn test_resolve_synthetic_intervals() {
        let spec = IntervalPolicy::resolve("1w").unwrap();
        assert_eq!(spec.unit, Unit::Day);
        assert_eq!(spec.rebucket, Some(Rebucket::Week));
        assert_eq!(spec.native_factor(), 7);
        assert_eq!(spec.bucket_duration(), Duration::days(7));

        let spec = IntervalPolicy::resolve("1M").unwrap();
        assert_eq!(spec.rebucket, Some(Rebucket::Month));
        assert_eq!(spec.native_factor(), 30);
    }

    #[test]
    fn test_resolve_unknown_interval() {
        let err = IntervalPolicy::resolve("5m").unwrap_err();
        assert!(matches!(err, Error::UnknownInterval(label) if label == "5m"));
    }

    #[test]
    fn test_clamp_samples() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        assert_eq!(spec.clamp_samples(0), 1);
        assert_eq!(spec.clamp_samples(15), 15);
        assert_eq!(spec.clamp_samples(500), 30);
    }

    #[test]
    fn test_every_listed_label_resolves() {
        for label in IntervalPolicy::labels() {
            assert!(IntervalPolicy::resolve(label).is_ok());
        }
    }
}
