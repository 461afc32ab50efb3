//! Intel dashboard service: binary entrypoint.
//! Boots the Axum HTTP server, wiring the dashboard state, routes and metrics.

use anyhow::Context;
use intel_dashboard::{api, dashboard_from_config, metrics::Metrics, AppState, DashboardConfig};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - DASHBOARD_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("DASHBOARD_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("intel_dashboard=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = DashboardConfig::load_default().context("loading dashboard config")?;
    let state = AppState::new(dashboard_from_config(&cfg)?);

    // First load in the background so startup does not wait on the backend.
    let warm = state.dashboard.clone();
    tokio::spawn(async move {
        warm.refresh().await;
    });

    let mut router = api::create_router(state);
    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => tracing::warn!(error = %e, "prometheus recorder not installed; /metrics disabled"),
    }

    Ok(router.into())
}
