// src/updates/supabase.rs
//! PostgREST (Supabase) backed update source.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::DashboardConfig;
use crate::updates::types::{DataSourceUnavailable, UpdateRecord, UpdateSource};

pub struct SupabaseSource {
    base_url: Option<String>,
    api_key: Option<String>,
    table: String,
    client: Client,
}

impl SupabaseSource {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            api_key: Some(api_key.into()),
            table: table.into(),
            client: Client::new(),
        }
    }

    /// Missing URL or key is allowed here; every fetch then fails and the
    /// dashboard shows the fallback set.
    pub fn from_config(cfg: &DashboardConfig) -> Self {
        let client = Client::builder()
            .user_agent(concat!("intel-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "reqwest builder failed, using default client");
                Client::new()
            });
        Self {
            base_url: cfg.supabase_url.clone(),
            api_key: cfg.supabase_anon_key.clone(),
            table: cfg.table.clone(),
            client,
        }
    }

    fn endpoint(&self, base: &str) -> String {
        format!("{}/rest/v1/{}", base.trim_end_matches('/'), self.table)
    }
}

#[async_trait]
impl UpdateSource for SupabaseSource {
    async fn fetch_updates(&self) -> Result<Vec<UpdateRecord>, DataSourceUnavailable> {
        let (Some(base), Some(key)) = (&self.base_url, &self.api_key) else {
            return Err(DataSourceUnavailable::new("supabase url or key not configured"));
        };

        let rows = self
            .client
            .get(self.endpoint(base))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .header("apikey", key)
            .bearer_auth(key)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<UpdateRecord>>()
            .await?;

        tracing::debug!(rows = rows.len(), table = %self.table, "supabase fetch ok");
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let s = SupabaseSource::new("https://abc.supabase.co/", "k", "competitor_updates");
        assert_eq!(
            s.endpoint("https://abc.supabase.co/"),
            "https://abc.supabase.co/rest/v1/competitor_updates"
        );
    }

    #[tokio::test]
    async fn unconfigured_source_is_unavailable() {
        let cfg = DashboardConfig::default();
        let s = SupabaseSource::from_config(&cfg);
        let err = s.fetch_updates().await.unwrap_err();
        assert!(err.reason.contains("not configured"));
    }
}
