//! # Dashboard state
//! Holds the latest [`ViewModel`] and runs refreshes against the data source.
//!
//! Overlapping refreshes are independent requests. Each one takes a ticket
//! from a monotonic counter; a result is stored only if its ticket is newer
//! than the one already stored, so a slow older response never overwrites a
//! newer one.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use metrics::gauge;

use crate::updates::types::{UpdateRecord, UpdateSource};
use crate::updates::fetch_and_normalize;
use crate::view_model::ViewModel;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub seq: u64,
    pub view: Arc<ViewModel>,
}

pub struct Dashboard {
    source: Arc<dyn UpdateSource>,
    fallback: Arc<Vec<UpdateRecord>>,
    next_seq: AtomicU64,
    in_flight: AtomicUsize,
    latest: RwLock<Option<Snapshot>>,
}

/// Decrements the in-flight counter even if the refresh future is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(c: &'a AtomicUsize) -> Self {
        c.fetch_add(1, Ordering::SeqCst);
        Self(c)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Dashboard {
    pub fn new(source: Arc<dyn UpdateSource>, fallback: Vec<UpdateRecord>) -> Self {
        Self {
            source,
            fallback: Arc::new(fallback),
            next_seq: AtomicU64::new(1),
            in_flight: AtomicUsize::new(0),
            latest: RwLock::new(None),
        }
    }

    /// True while at least one refresh is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn fallback(&self) -> &[UpdateRecord] {
        &self.fallback
    }

    /// Latest stored snapshot, if any refresh has completed.
    pub fn latest(&self) -> Option<Snapshot> {
        self.latest
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    /// Fetch, rebuild the view model and store it unless a newer refresh
    /// already landed. Returns the view model this call produced either way.
    pub async fn refresh(&self) -> Arc<ViewModel> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlight::enter(&self.in_flight);

        let fetched = fetch_and_normalize(self.source.as_ref(), &self.fallback).await;
        let view = Arc::new(ViewModel::from_fetched(fetched));

        let mut slot = self
            .latest
            .write()
            .unwrap_or_else(|poison| poison.into_inner());
        match slot.as_ref() {
            Some(cur) if cur.seq > seq => {
                tracing::debug!(seq, stored = cur.seq, "discarding stale refresh result");
            }
            _ => {
                tracing::info!(
                    seq,
                    records = view.stats.total,
                    using_fallback = view.using_fallback,
                    "dashboard refreshed"
                );
                gauge!("dashboard_records").set(view.stats.total as f64);
                *slot = Some(Snapshot {
                    seq,
                    view: Arc::clone(&view),
                });
            }
        }
        view
    }

    /// Latest view model, refreshing first if nothing has been loaded yet.
    pub async fn current(&self) -> Arc<ViewModel> {
        match self.latest() {
            Some(s) => s.view,
            None => self.refresh().await,
        }
    }
}
