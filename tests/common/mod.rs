// tests/common/mod.rs
// Stub update sources shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use intel_dashboard::{DataSourceUnavailable, RecordId, UpdateRecord, UpdateSource};
use tokio::sync::oneshot;

pub fn rec(id: i64, score: Option<f64>, category: Option<&str>, significant: Option<bool>) -> UpdateRecord {
    UpdateRecord {
        id: RecordId::Int(id),
        summary: format!("update #{id}"),
        sentiment_score: score,
        category: category.map(str::to_string),
        is_significant: significant,
        created_at: "2025-02-01T10:00:00Z".to_string(),
    }
}

/// Always answers with the same rows.
pub struct StaticSource {
    pub rows: Vec<UpdateRecord>,
    pub calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(rows: Vec<UpdateRecord>) -> Self {
        Self {
            rows,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl UpdateSource for StaticSource {
    async fn fetch_updates(&self) -> Result<Vec<UpdateRecord>, DataSourceUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.clone())
    }
    fn name(&self) -> &'static str {
        "static"
    }
}

/// Always fails.
pub struct FailingSource(pub &'static str);

#[async_trait::async_trait]
impl UpdateSource for FailingSource {
    async fn fetch_updates(&self) -> Result<Vec<UpdateRecord>, DataSourceUnavailable> {
        Err(DataSourceUnavailable::new(self.0))
    }
    fn name(&self) -> &'static str {
        "failing"
    }
}

pub type Answer = Result<Vec<UpdateRecord>, DataSourceUnavailable>;

/// Each fetch waits on the next queued channel, so tests decide when (and in
/// which order) overlapping fetches resolve.
pub struct GatedSource {
    gates: Mutex<VecDeque<oneshot::Receiver<Answer>>>,
}

impl GatedSource {
    pub fn new(n: usize) -> (Self, Vec<oneshot::Sender<Answer>>) {
        let mut gates = VecDeque::with_capacity(n);
        let mut senders = Vec::with_capacity(n);
        for _ in 0..n {
            let (tx, rx) = oneshot::channel();
            gates.push_back(rx);
            senders.push(tx);
        }
        (
            Self {
                gates: Mutex::new(gates),
            },
            senders,
        )
    }
}

#[async_trait::async_trait]
impl UpdateSource for GatedSource {
    async fn fetch_updates(&self) -> Result<Vec<UpdateRecord>, DataSourceUnavailable> {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(DataSourceUnavailable::new("gate dropped"))),
            None => Err(DataSourceUnavailable::new("no gate left")),
        }
    }
    fn name(&self) -> &'static str {
        "gated"
    }
}
