// src/updates/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque row identifier. Backends hand out either integer keys or uuids/text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// One competitor-update row as stored in the `competitor_updates` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    /// Conventionally in [-1, 1]; `None` means the row had no score yet.
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_significant: Option<bool>,
    /// ISO-8601 text, passed through as the backend returned it.
    pub created_at: String,
}

impl UpdateRecord {
    /// Score with the "missing means zero" rule applied.
    pub fn score(&self) -> f64 {
        self.sentiment_score.unwrap_or(0.0)
    }

    pub fn significant(&self) -> bool {
        self.is_significant.unwrap_or(false)
    }

    /// Category if present and non-empty.
    pub fn category_label(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// The single failure kind of the data source: network failure, query error
/// or malformed response all land here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("data source unavailable: {reason}")]
pub struct DataSourceUnavailable {
    pub reason: String,
}

impl DataSourceUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for DataSourceUnavailable {
    fn from(e: reqwest::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// "List all updates ordered by created_at descending."
#[async_trait::async_trait]
pub trait UpdateSource: Send + Sync {
    async fn fetch_updates(&self) -> Result<Vec<UpdateRecord>, DataSourceUnavailable>;
    fn name(&self) -> &'static str;
}
