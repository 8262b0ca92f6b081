//! Window resolution: user selection modes to concrete provider queries.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::interval::IntervalSpec;

/// The three ways a user can pick a time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowMode {
    /// "Show the N most recent buckets" slider.
    Recent { count: usize },
    /// Start/end sliders, both counted backward from now in displayed
    /// buckets. `start_offset` is the older edge.
    OffsetRange { start_offset: u32, end_offset: u32 },
    /// Absolute calendar range from two date pickers.
    DateRange { start: NaiveDate, end: NaiveDate },
}

/// Concrete provider query for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryWindow {
    /// Provider `toTs` parameter. `None` means "up to now".
    pub end_timestamp: Option<DateTime<Utc>>,
    /// Native candles to request, always >= 1.
    pub sample_count: usize,
    /// Candles before this instant are dropped after fetching.
    pub filter_start: Option<DateTime<Utc>>,
}

/// Warning-worthy conditions found while resolving a window. These are not
/// errors: the cycle proceeds, but the UI should tell the user instead of
/// rendering a silently empty chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RenderWarning {
    /// The selected window collapsed to a single bucket.
    DegenerateWindow { detail: String },
}

/// A resolved window plus any warnings raised along the way.
#[derive(Debug, Clone)]
pub struct ResolvedWindow {
    pub query: QueryWindow,
    pub warnings: Vec<RenderWarning>,
}

/// Pure translation from a UI parameter snapshot + wall-clock instant into a
/// provider query. No hidden state: the same inputs always resolve to the
/// same window.
pub struct WindowResolver;

impl WindowResolver {
    pub fn resolve(mode: &WindowMode, spec: IntervalSpec, now: DateTime<Utc>) -> ResolvedWindow {
        match *mode {
            WindowMode::Recent { count } => ResolvedWindow {
                query: QueryWindow {
                    end_timestamp: None,
                    sample_count: spec.clamp_samples(count.saturating_mul(spec.native_factor())),
                    filter_start: None,
                },
                warnings: Vec::new(),
            },
            WindowMode::OffsetRange {
                start_offset,
                end_offset,
            } => Self::resolve_offsets(start_offset, end_offset, spec, now),
            WindowMode::DateRange { start, end } => Self::resolve_dates(start, end, spec, now),
        }
    }

    fn resolve_offsets(
        start_offset: u32,
        end_offset: u32,
        spec: IntervalSpec,
        now: DateTime<Utc>,
    ) -> ResolvedWindow {
        let bucket = spec.bucket_duration();
        let end_timestamp = now - bucket * end_offset as i32;

        if start_offset <= end_offset {
            // Start is no older than end: clamp to a single bucket ending at
            // the end offset rather than requesting zero or negative samples.
            return ResolvedWindow {
                query: QueryWindow {
                    end_timestamp: Some(end_timestamp),
                    sample_count: spec.clamp_samples(spec.native_factor()),
                    filter_start: None,
                },
                warnings: vec![RenderWarning::DegenerateWindow {
                    detail: format!(
                        "start offset {start_offset} is not older than end offset {end_offset}; \
                         showing a single bucket"
                    ),
                }],
            };
        }

        let buckets = (start_offset - end_offset) as usize;
        ResolvedWindow {
            query: QueryWindow {
                end_timestamp: Some(end_timestamp),
                sample_count: spec.clamp_samples(buckets.saturating_mul(spec.native_factor())),
                filter_start: Some(now - bucket * start_offset as i32),
            },
            warnings: Vec::new(),
        }
    }

    fn resolve_dates(
        start: NaiveDate,
        end: NaiveDate,
        spec: IntervalSpec,
        now: DateTime<Utc>,
    ) -> ResolvedWindow {
        let today = now.date_naive();
        let filter_start = start.and_time(NaiveTime::MIN).and_utc();

        // An end date of today (or later) means "up to now": the provider is
        // never asked for a future end-timestamp, and today's partial bucket
        // is included.
        let (end_timestamp, effective_end) = if end >= today {
            (None, now)
        } else {
            let midnight = end.and_time(NaiveTime::MIN).and_utc();
            (Some(midnight), midnight)
        };

        if start > end {
            return ResolvedWindow {
                query: QueryWindow {
                    end_timestamp,
                    sample_count: 1,
                    filter_start: None,
                },
                warnings: vec![RenderWarning::DegenerateWindow {
                    detail: format!("start date {start} is after end date {end}"),
                }],
            };
        }

        let unit_secs = spec.unit.duration().num_seconds();
        let span_secs = (effective_end - filter_start).num_seconds().max(0);
        let spanned = (span_secs + unit_secs - 1) / unit_secs;

        ResolvedWindow {
            query: QueryWindow {
                end_timestamp,
                sample_count: spec.clamp_samples(spanned as usize),
                filter_start: Some(filter_start),
            },
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalPolicy;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_recent_mode() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let resolved = WindowResolver::resolve(&WindowMode::Recent { count: 14 }, spec, fixed_now());

        assert_eq!(resolved.query.sample_count, 14);
        assert!(resolved.query.end_timestamp.is_none());
        assert!(resolved.query.filter_start.is_none());
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_recent_mode_expands_rebucket_factor() {
        let spec = IntervalPolicy::resolve("1w").unwrap();
        let resolved = WindowResolver::resolve(&WindowMode::Recent { count: 8 }, spec, fixed_now());

        // 8 weekly buckets need 56 daily candles.
        assert_eq!(resolved.query.sample_count, 56);
    }

    #[test]
    fn test_recent_mode_clamps_to_max_samples() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let resolved =
            WindowResolver::resolve(&WindowMode::Recent { count: 1000 }, spec, fixed_now());

        assert_eq!(resolved.query.sample_count, spec.max_samples);
    }

    #[test]
    fn test_offset_range_mode() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let now = fixed_now();
        let mode = WindowMode::OffsetRange {
            start_offset: 10,
            end_offset: 2,
        };

        let resolved = WindowResolver::resolve(&mode, spec, now);

        assert_eq!(resolved.query.sample_count, 8);
        assert_eq!(resolved.query.end_timestamp, Some(now - Duration::days(2)));
        assert_eq!(resolved.query.filter_start, Some(now - Duration::days(10)));
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_offset_range_weekly_buckets() {
        let spec = IntervalPolicy::resolve("1w").unwrap();
        let now = fixed_now();
        let mode = WindowMode::OffsetRange {
            start_offset: 4,
            end_offset: 1,
        };

        let resolved = WindowResolver::resolve(&mode, spec, now);

        assert_eq!(resolved.query.sample_count, 21);
        assert_eq!(resolved.query.end_timestamp, Some(now - Duration::days(7)));
        assert_eq!(resolved.query.filter_start, Some(now - Duration::days(28)));
    }

    #[test]
    fn test_offset_range_degenerates_to_one_sample() {
        let spec = IntervalPolicy::resolve("1h").unwrap();
        let now = fixed_now();

        for (start, end) in [(3u32, 3u32), (2, 5), (0, 0)] {
            let mode = WindowMode::OffsetRange {
                start_offset: start,
                end_offset: end,
            };
            let resolved = WindowResolver::resolve(&mode, spec, now);

            assert_eq!(resolved.query.sample_count, 1);
            assert!(resolved.query.filter_start.is_none());
            assert!(matches!(
                resolved.warnings.as_slice(),
                [RenderWarning::DegenerateWindow { .. }]
            ));
        }
    }

    #[test]
    fn test_date_range_in_the_past() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let now = fixed_now();
        let mode = WindowMode::DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
        };

        let resolved = WindowResolver::resolve(&mode, spec, now);

        let expected_end = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let expected_start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(resolved.query.end_timestamp, Some(expected_end));
        assert_eq!(resolved.query.filter_start, Some(expected_start));
        assert_eq!(resolved.query.sample_count, 10);
    }

    #[test]
    fn test_date_range_ending_today_is_open_ended() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let now = fixed_now();
        let mode = WindowMode::DateRange {
            start: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            end: now.date_naive(),
        };

        let resolved = WindowResolver::resolve(&mode, spec, now);

        assert!(resolved.query.end_timestamp.is_none());
        // May 10 midnight to May 15 noon is 5.5 days, rounded up.
        assert_eq!(resolved.query.sample_count, 6);
    }

    #[test]
    fn test_date_range_future_end_never_sent_to_provider() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let mode = WindowMode::DateRange {
            start: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };

        let resolved = WindowResolver::resolve(&mode, spec, fixed_now());

        assert!(resolved.query.end_timestamp.is_none());
    }

    #[test]
    fn test_date_range_zero_width_requests_one_sample() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let mode = WindowMode::DateRange {
            start: date,
            end: date,
        };

        let resolved = WindowResolver::resolve(&mode, spec, fixed_now());

        assert_eq!(resolved.query.sample_count, 1);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_date_range_inverted_dates_degenerate() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let mode = WindowMode::DateRange {
            start: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        };

        let resolved = WindowResolver::resolve(&mode, spec, fixed_now());

        assert_eq!(resolved.query.sample_count, 1);
        assert!(matches!(
            resolved.warnings.as_slice(),
            [RenderWarning::DegenerateWindow { .. }]
        ));
    }

    #[test]
    fn test_date_range_clamped_to_max_samples() {
        let spec = IntervalPolicy::resolve("1d").unwrap();
        let mode = WindowMode::DateRange {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };

        let resolved = WindowResolver::resolve(&mode, spec, fixed_now());

        assert_eq!(resolved.query.sample_count, spec.max_samples);
    }
}
