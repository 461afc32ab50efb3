// src/updates/fallback.rs
//! Sample records shown when the backend table is empty or unreachable.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::fs;
use std::path::Path;

use crate::updates::types::{RecordId, UpdateRecord};

/// (summary, score, category, significant, days ago)
const SAMPLES: [(&str, f64, &str, bool, i64); 5] = [
    (
        "TechRival Inc launched a new AI-powered analytics dashboard with real-time insights.",
        0.75,
        "Product Launch",
        true,
        2,
    ),
    (
        "DataCorp Solutions announced 15% price reduction across all enterprise plans.",
        -0.3,
        "Pricing",
        true,
        1,
    ),
    (
        "CloudFirst Systems updated website with refreshed branding. No product changes.",
        0.1,
        "Marketing",
        false,
        0,
    ),
    (
        "InnovateTech acquired AI startup for $50M to integrate ML into core product.",
        0.85,
        "M&A",
        true,
        3,
    ),
    (
        "TechRival key engineering lead departed for competitor. May signal internal issues.",
        -0.5,
        "Leadership",
        true,
        4,
    ),
];

/// The embedded sample set, timestamps anchored to `now`.
pub fn sample_updates(now: DateTime<Utc>) -> Vec<UpdateRecord> {
    SAMPLES
        .iter()
        .zip(1i64..)
        .map(|(&(summary, score, category, significant, days), id)| UpdateRecord {
            id: RecordId::Int(id),
            summary: summary.to_string(),
            sentiment_score: Some(score),
            category: Some(category.to_string()),
            is_significant: Some(significant),
            created_at: (now - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true),
        })
        .collect()
}

/// Load a fallback set from a JSON array of records (same schema as the table).
pub fn load_from_file(path: &Path) -> Result<Vec<UpdateRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading fallback dataset from {}", path.display()))?;
    let records: Vec<UpdateRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing fallback dataset {}", path.display()))?;
    Ok(records)
}

/// Fallback set for the running service: the file if one is configured,
/// otherwise the embedded samples.
pub fn resolve(path: Option<&Path>, now: DateTime<Utc>) -> Result<Vec<UpdateRecord>> {
    match path {
        Some(p) => load_from_file(p),
        None => Ok(sample_updates(now)),
    }
}
