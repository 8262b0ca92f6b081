//! Render-cycle engine: one fetch-aggregate-assemble pass per interaction.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use crate::catalog::SymbolCatalog;
use crate::chart::{ChartAssembler, SymbolChart};
use crate::data::{enrich, filter_window, rebucket};
use crate::error::{Error, Result};
use crate::interval::IntervalPolicy;
use crate::provider::CandleSource;
use crate::window::{RenderWarning, WindowMode, WindowResolver};

/// UI parameter snapshot for one render cycle.
#[derive(Debug, Clone)]
pub struct RenderParams {
    /// Selected pair labels. Duplicates are dropped, first occurrence wins.
    pub symbols: Vec<String>,
    /// Granularity label, e.g. "1d".
    pub interval: String,
    /// Window selection mode.
    pub window: WindowMode,
}

/// Per-symbol outcome slot. A failed fetch never aborts the cycle; it lands
/// here as an annotation for the rendering layer.
#[derive(Debug)]
pub enum SymbolSlot {
    Ready(SymbolChart),
    Failed { label: String, error: Error },
}

impl SymbolSlot {
    pub fn label(&self) -> &str {
        match self {
            SymbolSlot::Ready(chart) => &chart.label,
            SymbolSlot::Failed { label, .. } => label,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SymbolSlot::Failed { .. })
    }
}

/// Output of one render cycle, ready for the rendering layer.
#[derive(Debug)]
pub struct ViewModel {
    /// Monotonically increasing cycle id. The UI must discard any ViewModel
    /// whose id is below the newest one it has seen, so late responses from
    /// an earlier cycle never mix into a newer render.
    pub cycle: u64,
    pub generated_at: DateTime<Utc>,
    pub interval: String,
    pub symbols: Vec<SymbolSlot>,
    pub warnings: Vec<RenderWarning>,
}

impl ViewModel {
    /// Labels of symbols whose fetch failed this cycle.
    pub fn failed_labels(&self) -> Vec<&str> {
        self.symbols
            .iter()
            .filter(|s| s.is_failed())
            .map(|s| s.label())
            .collect()
    }
}

/// Dashboard engine. Holds the candle source and the cycle counter; every
/// render is otherwise a pure function of the parameter snapshot and `now`.
pub struct Dashboard<S> {
    source: S,
    cycle: AtomicU64,
}

impl<S: CandleSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cycle: AtomicU64::new(0),
        }
    }

    /// Run one render cycle.
    ///
    /// `UnknownSymbol` and `UnknownInterval` abort the cycle: they mean the
    /// UI offered a choice this crate's tables do not know. Provider errors
    /// are isolated per symbol; the cycle proceeds with whatever succeeded.
    pub async fn render(&self, params: &RenderParams, now: DateTime<Utc>) -> Result<ViewModel> {
        let cycle = self.cycle.fetch_add(1, Ordering::Relaxed) + 1;
        let spec = IntervalPolicy::resolve(&params.interval)?;

        // Resolve the whole selection up front so an unknown label aborts
        // before any network traffic.
        let mut selection: Vec<(&str, &'static str)> = Vec::new();
        for label in &params.symbols {
            let ticker = SymbolCatalog::resolve(label)?;
            if !selection.iter().any(|(l, _)| *l == label.as_str()) {
                selection.push((label.as_str(), ticker));
            }
        }

        let resolved = WindowResolver::resolve(&params.window, spec, now);
        for warning in &resolved.warnings {
            warn!(cycle, ?warning, "window resolved with warning");
        }
        let query = resolved.query;

        info!(
            cycle,
            interval = %params.interval,
            symbols = selection.len(),
            samples = query.sample_count,
            "render cycle started"
        );

        let source = &self.source;
        let fetches = selection.iter().map(|&(label, ticker)| async move {
            let outcome = source
                .fetch(ticker, spec.unit, query.sample_count, query.end_timestamp)
                .await;
            (label, ticker, outcome)
        });

        let mut slots = Vec::with_capacity(selection.len());
        for (label, ticker, outcome) in join_all(fetches).await {
            match outcome {
                Ok(series) => {
                    let filtered = filter_window(&series, query.filter_start);
                    let bucketed = match spec.rebucket {
                        Some(rule) => rebucket(&filtered, rule),
                        None => filtered,
                    };
                    let enriched = enrich(bucketed);
                    slots.push(SymbolSlot::Ready(ChartAssembler::assemble(
                        label,
                        ticker,
                        spec.display_format,
                        &enriched,
                    )));
                }
                Err(error) => {
                    warn!(cycle, symbol = label, %error, "symbol fetch failed");
                    slots.push(SymbolSlot::Failed {
                        label: label.to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            cycle,
            failed = slots.iter().filter(|s| s.is_failed()).count(),
            "render cycle complete"
        );

        Ok(ViewModel {
            cycle,
            generated_at: now,
            interval: params.interval.clone(),
            symbols: slots,
            warnings: resolved.warnings,
        })
    }
}
