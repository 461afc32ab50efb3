// src/lib.rs
// Public library surface for the service binary and integration tests.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod panel;
pub mod sentiment;
pub mod timefmt;
pub mod updates;
pub mod view_model;

use std::sync::Arc;

use axum::Router;

pub use crate::api::{create_router, AppState};
pub use crate::config::DashboardConfig;
pub use crate::dashboard::Dashboard;
pub use crate::updates::types::{DataSourceUnavailable, RecordId, UpdateRecord, UpdateSource};
pub use crate::view_model::ViewModel;

use crate::updates::{fallback, supabase::SupabaseSource};

/// Build the dashboard for a config: PostgREST source plus the configured (or
/// embedded) fallback set.
pub fn dashboard_from_config(cfg: &DashboardConfig) -> anyhow::Result<Dashboard> {
    if !cfg.is_configured() {
        tracing::warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set; dashboard will show mock data");
    }
    let source = Arc::new(SupabaseSource::from_config(cfg));
    let fallback = fallback::resolve(cfg.fallback_path.as_deref(), chrono::Utc::now())?;
    Ok(Dashboard::new(source, fallback))
}

/// Router for an already built dashboard (no `/metrics`; the binary merges that in).
pub fn app_with(dashboard: Dashboard) -> Router {
    create_router(AppState::new(dashboard))
}

/// Router built from the default config layering (file + env).
pub fn app() -> anyhow::Result<Router> {
    let cfg = DashboardConfig::load_default()?;
    Ok(app_with(dashboard_from_config(&cfg)?))
}
