//! # View model
//! Derived, render-ready aggregate over a list of update records: the
//! records themselves, summary stats and the category histogram.
//!
//! Everything here is a pure function of its input; a refresh rebuilds the
//! whole thing from scratch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::updates::types::UpdateRecord;
use crate::updates::Fetched;

/// Label for records without a (non-empty) category.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub avg_sentiment: f64,
    pub high_impact: usize,
}

impl Stats {
    /// Single pass; an empty list yields all zeros.
    pub fn compute(records: &[UpdateRecord]) -> Self {
        let (total, sum, high_impact) =
            records
                .iter()
                .fold((0usize, 0.0f64, 0usize), |(n, sum, hi), r| {
                    (n + 1, sum + r.score(), hi + usize::from(r.significant()))
                });
        let avg_sentiment = if total > 0 { sum / total as f64 } else { 0.0 };
        Self {
            total,
            avg_sentiment,
            high_impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Category → count in first-seen order. Serializes as `[{name, count}, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryHistogram {
    entries: Vec<CategoryCount>,
}

impl CategoryHistogram {
    pub fn compute(records: &[UpdateRecord]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<CategoryCount> = Vec::new();
        for r in records {
            let name = r.category_label().unwrap_or(UNCATEGORIZED);
            match index.get(name) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(name, entries.len());
                    entries.push(CategoryCount {
                        name: name.to_string(),
                        count: 1,
                    });
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.count)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts; equals the number of records it was built from.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub records: Vec<UpdateRecord>,
    pub using_fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub stats: Stats,
    pub category_histogram: CategoryHistogram,
}

impl ViewModel {
    pub fn build(records: Vec<UpdateRecord>, using_fallback: bool) -> Self {
        let stats = Stats::compute(&records);
        let category_histogram = CategoryHistogram::compute(&records);
        Self {
            records,
            using_fallback,
            fallback_reason: None,
            stats,
            category_histogram,
        }
    }

    pub fn from_fetched(f: Fetched) -> Self {
        let mut vm = Self::build(f.records, f.using_fallback);
        vm.fallback_reason = f.fallback_reason;
        vm
    }
}
