//! Render-ready projection of a [`ViewModel`]. Stat cards, chart bars and
//! feed items carry their display strings already resolved.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sentiment::{format_score, format_signed_score, SentimentLabel};
use crate::timefmt::format_relative;
use crate::updates::types::UpdateRecord;
use crate::view_model::ViewModel;

/// Bar colours, cycled by bar index.
pub const CHART_PALETTE: [&str; 6] = [
    "#8b5cf6", "#06b6d4", "#f59e0b", "#10b981", "#f43f5e", "#6366f1",
];

pub const FALLBACK_NOTICE: &str =
    "Displaying mock data. Add data to Supabase to see live updates.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Violet,
    Emerald,
    Amber,
    Rose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub subtext: &'static str,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub name: String,
    pub count: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentBadge {
    pub label: SentimentLabel,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    pub summary: String,
    pub category: Option<String>,
    pub time: String,
    pub key_event: bool,
    pub sentiment: SentimentBadge,
}

impl FeedItem {
    pub fn from_record(r: &UpdateRecord, now: DateTime<Utc>) -> Self {
        let score = r.score();
        Self {
            id: r.id.to_string(),
            summary: r.summary.clone(),
            category: r.category_label().map(str::to_string),
            time: format_relative(&r.created_at, now),
            key_event: r.significant(),
            sentiment: SentimentBadge {
                label: SentimentLabel::classify(score),
                score: format_score(score),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub cards: Vec<StatCard>,
    pub chart: Vec<ChartBar>,
    pub feed: Vec<FeedItem>,
}

impl Panel {
    pub fn build(vm: &ViewModel, loading: bool, now: DateTime<Utc>) -> Self {
        let notice = (vm.using_fallback && !loading).then_some(FALLBACK_NOTICE);
        Self {
            loading,
            notice,
            cards: stat_cards(vm),
            chart: chart_bars(vm),
            feed: vm
                .records
                .iter()
                .map(|r| FeedItem::from_record(r, now))
                .collect(),
        }
    }
}

pub fn stat_cards(vm: &ViewModel) -> Vec<StatCard> {
    let s = &vm.stats;
    let up = s.avg_sentiment >= 0.0;
    vec![
        StatCard {
            label: "Total Updates",
            value: s.total.to_string(),
            subtext: "tracked",
            tone: Tone::Violet,
            trend: None,
        },
        StatCard {
            label: "Avg Sentiment",
            value: format_signed_score(s.avg_sentiment),
            subtext: "score",
            tone: if up { Tone::Emerald } else { Tone::Rose },
            trend: Some(if up { Trend::Up } else { Trend::Down }),
        },
        StatCard {
            label: "High Impact Events",
            value: s.high_impact.to_string(),
            subtext: "require attention",
            tone: Tone::Amber,
            trend: None,
        },
    ]
}

pub fn chart_bars(vm: &ViewModel) -> Vec<ChartBar> {
    vm.category_histogram
        .iter()
        .enumerate()
        .map(|(i, e)| ChartBar {
            name: e.name.clone(),
            count: e.count,
            color: CHART_PALETTE[i % CHART_PALETTE.len()],
        })
        .collect()
}
