// src/updates/mod.rs
pub mod fallback;
pub mod supabase;
pub mod types;

use crate::updates::types::{UpdateRecord, UpdateSource};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("dashboard_refresh_total", "Fetches issued against the data source.");
        describe_counter!(
            "dashboard_fallback_total",
            "Fetches answered with the fallback dataset (label reason=empty|error)."
        );
        describe_gauge!("dashboard_records", "Records in the latest view model.");
        describe_histogram!("dashboard_fetch_ms", "Data source fetch time in milliseconds.");
    });
}

/// Outcome of one fetch: the records to display and whether they are the
/// fallback set.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub records: Vec<UpdateRecord>,
    pub using_fallback: bool,
    /// Diagnostic only; `None` when live data is used.
    pub fallback_reason: Option<String>,
}

impl Fetched {
    fn fallback(set: &[UpdateRecord], reason: String) -> Self {
        Self {
            records: set.to_vec(),
            using_fallback: true,
            fallback_reason: Some(reason),
        }
    }
}

/// Replace every missing sentiment score with 0. Everything else passes through.
pub fn normalize(records: Vec<UpdateRecord>) -> Vec<UpdateRecord> {
    records
        .into_iter()
        .map(|mut r| {
            r.sentiment_score = Some(r.score());
            r
        })
        .collect()
}

/// Fetch once and decide between live data and the fallback set.
///
/// Failures never propagate: an error or an empty result both yield the
/// caller's fallback set verbatim, with the reason kept for diagnostics.
pub async fn fetch_and_normalize(source: &dyn UpdateSource, fallback: &[UpdateRecord]) -> Fetched {
    ensure_metrics_described();
    counter!("dashboard_refresh_total").increment(1);

    let t0 = std::time::Instant::now();
    let result = source.fetch_updates().await;
    histogram!("dashboard_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    match result {
        Ok(rows) if !rows.is_empty() => Fetched {
            records: normalize(rows),
            using_fallback: false,
            fallback_reason: None,
        },
        Ok(_) => {
            tracing::warn!(source = source.name(), "data source returned no rows, using mock data");
            counter!("dashboard_fallback_total", "reason" => "empty").increment(1);
            Fetched::fallback(fallback, "data source returned no rows".to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, source = source.name(), "using mock data");
            counter!("dashboard_fallback_total", "reason" => "error").increment(1);
            Fetched::fallback(fallback, e.reason)
        }
    }
}
